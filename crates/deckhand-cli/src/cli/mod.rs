//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use deckhand_core::domain::{RequestId, TemplateId};

use crate::config::{POLL_INTERVAL_SECS, WAIT_TIMEOUT_SECS};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "deckhand",
    bin_name = "deckhand",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{2693} Template catalog and deployment dispatch",
    long_about = "Deckhand lists the deployment templates offered by a catalog \
                  authority, submits deployments of them, and follows the \
                  resulting requests until they succeed or fail.",
    after_help = "EXAMPLES:\n\
        \x20 deckhand list\n\
        \x20 deckhand deploy 1 --wait\n\
        \x20 deckhand status req-3f2a\n\
        \x20 deckhand --catalog-url https://catalog.internal list --format json\n\
        \x20 deckhand completions bash > /usr/share/bash-completion/completions/deckhand",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the templates in the catalog.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 deckhand list\n\
            \x20 deckhand list --format csv\n\
            \x20 deckhand --offline list"
    )]
    List(ListArgs),

    /// Deploy a template.
    #[command(
        visible_alias = "d",
        about = "Deploy a template",
        after_help = "EXAMPLES:\n\
            \x20 deckhand deploy 1\n\
            \x20 deckhand deploy 2 --wait\n\
            \x20 deckhand deploy 3 --wait --interval 10 --timeout 900 --yes"
    )]
    Deploy(DeployArgs),

    /// Show the status of a deployment request.
    #[command(
        visible_alias = "st",
        about = "Show deployment status",
        after_help = "EXAMPLES:\n\
            \x20 deckhand status req-3f2a\n\
            \x20 deckhand --output-format json status req-3f2a\n\n\
            NOTE:\n\
            \x20 The built-in catalog (--offline) forgets deployments when the\n\
            \x20 command that submitted them exits, so status only works remotely."
    )]
    Status(StatusArgs),

    /// Initialise a Deckhand configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 deckhand init           # default location\n\
            \x20 deckhand init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 deckhand completions bash > ~/.local/share/bash-completion/completions/deckhand\n\
            \x20 deckhand completions zsh  > ~/.zfunc/_deckhand\n\
            \x20 deckhand completions fish > ~/.config/fish/completions/deckhand.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Deckhand configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 deckhand config get catalog.base_url\n\
            \x20 deckhand config list\n\
            \x20 deckhand config path"
    )]
    Config(ConfigCommands),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `deckhand list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format; defaults to JSON under `--output-format json`, a
    /// table otherwise.
    #[arg(long = "format", value_enum, help = "Output format")]
    pub format: Option<ListFormat>,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── deploy ────────────────────────────────────────────────────────────────────

/// Arguments for `deckhand deploy`.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Catalog id of the template to deploy.
    #[arg(value_name = "TEMPLATE_ID", help = "Template id (see `deckhand list`)")]
    pub template: TemplateId,

    /// Follow the request until it succeeds or fails.
    #[arg(short = 'w', long = "wait", help = "Wait for the deployment to finish")]
    pub wait: bool,

    /// Seconds between status polls while waiting.
    #[arg(
        long = "interval",
        value_name = "SECS",
        requires = "wait",
        value_parser = clap::value_parser!(u64).range(POLL_INTERVAL_SECS),
        help = "Polling interval in seconds (default: deploy.poll_interval_secs)"
    )]
    pub interval: Option<u64>,

    /// Give up waiting after this many seconds.
    #[arg(
        long = "timeout",
        value_name = "SECS",
        requires = "wait",
        value_parser = clap::value_parser!(u64).range(WAIT_TIMEOUT_SECS),
        help = "Wait timeout in seconds (default: deploy.wait_timeout_secs)"
    )]
    pub timeout: Option<u64>,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Deploy without asking for confirmation")]
    pub yes: bool,
}

// ── status ────────────────────────────────────────────────────────────────────

/// Arguments for `deckhand status`.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Request id printed by `deckhand deploy`.
    #[arg(value_name = "REQUEST_ID", help = "Deployment request id")]
    pub request: RequestId,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `deckhand init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `deckhand completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `deckhand config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `catalog.base_url`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
