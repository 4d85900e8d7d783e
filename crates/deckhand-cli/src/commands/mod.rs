//! One module per subcommand; each exposes an `execute` entry point.

pub mod completions;
pub mod config;
pub mod deploy;
pub mod init;
pub mod list;
pub mod status;
