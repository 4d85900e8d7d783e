//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (`--catalog-url`, `--offline`, `--no-color`; see
//!    [`AppConfig::with_overrides`])
//! 2. Environment variables: `DECKHAND_<SECTION>__<KEY>`, e.g.
//!    `DECKHAND_CATALOG__BASE_URL`
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::cli::global::{GlobalArgs, OutputFormat};

/// Accepted `deploy.poll_interval_secs` / `--interval` values.
pub const POLL_INTERVAL_SECS: RangeInclusive<u64> = 1..=3_600;

/// Accepted `deploy.wait_timeout_secs` / `--timeout` values (one week max).
pub const WAIT_TIMEOUT_SECS: RangeInclusive<u64> = 1..=604_800;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where templates come from.
    pub catalog: CatalogConfig,
    /// Polling behaviour of `deploy --wait`.
    pub deploy: DeployConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    pub base_url: String,
    pub timeout_secs: u64,
}

/// Which catalog authority the CLI talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// The HTTP authority at `catalog.base_url`.
    Remote,
    /// The templates compiled into the binary.
    Builtin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub poll_interval_secs: u64,
    pub wait_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                source: CatalogSource::Remote,
                base_url: "http://localhost:8080".into(),
                timeout_secs: 10,
            },
            deploy: DeployConfig {
                poll_interval_secs: 5,
                wait_timeout_secs: 600,
            },
            output: OutputConfig {
                no_color: false,
                format: OutputFormat::Auto,
            },
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then
    /// `DECKHAND_*` environment variables.
    ///
    /// A file passed via `--config` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => toml_file(path).required(true),
            None => toml_file(&Self::config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("DECKHAND")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the `deploy` command cannot honour.
    pub fn validate(&self) -> anyhow::Result<()> {
        let deploy = &self.deploy;
        anyhow::ensure!(
            POLL_INTERVAL_SECS.contains(&deploy.poll_interval_secs),
            "deploy.poll_interval_secs must be between {} and {}, got {}",
            POLL_INTERVAL_SECS.start(),
            POLL_INTERVAL_SECS.end(),
            deploy.poll_interval_secs
        );
        anyhow::ensure!(
            WAIT_TIMEOUT_SECS.contains(&deploy.wait_timeout_secs),
            "deploy.wait_timeout_secs must be between {} and {}, got {}",
            WAIT_TIMEOUT_SECS.start(),
            WAIT_TIMEOUT_SECS.end(),
            deploy.wait_timeout_secs
        );
        Ok(())
    }

    /// Apply the CLI flags that shadow config keys.
    pub fn with_overrides(mut self, args: &GlobalArgs) -> Self {
        if let Some(url) = &args.catalog_url {
            self.catalog.base_url = url.clone();
            self.catalog.source = CatalogSource::Remote;
        }
        if args.offline {
            self.catalog.source = CatalogSource::Builtin;
        }
        if args.no_color {
            self.output.no_color = true;
        }
        self
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.deckhand.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "deckhand", "deckhand")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".deckhand.toml"))
    }
}

fn toml_file(path: &Path) -> File<config::FileSourceFile, FileFormat> {
    File::from(path).format(FileFormat::Toml)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args() -> GlobalArgs {
        GlobalArgs {
            verbose: 0,
            quiet: false,
            no_color: false,
            config: None,
            output_format: OutputFormat::Auto,
            catalog_url: None,
            offline: false,
        }
    }

    #[test]
    fn default_source_is_remote() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.catalog.source, CatalogSource::Remote);
        assert_eq!(cfg.catalog.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[catalog]\nsource = \"builtin\"\nbase_url = \"https://catalog.internal\"\n\n[deploy]\npoll_interval_secs = 2"
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(cfg.catalog.source, CatalogSource::Builtin);
        assert_eq!(cfg.catalog.base_url, "https://catalog.internal");
        assert_eq!(cfg.deploy.poll_interval_secs, 2);
        // Untouched keys keep their defaults.
        assert_eq!(cfg.deploy.wait_timeout_secs, 600);
        assert_eq!(cfg.catalog.timeout_secs, 10);
    }

    #[test]
    fn explicit_missing_file_is_error() {
        let missing = PathBuf::from("/definitely/not/here/deckhand.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn invalid_source_is_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[catalog]\nsource = \"carrier-pigeon\"").unwrap();

        assert!(AppConfig::load(Some(&file.path().to_path_buf())).is_err());
    }

    #[test]
    fn zero_poll_interval_is_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[deploy]\npoll_interval_secs = 0").unwrap();

        let err = AppConfig::load(Some(&file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("deploy.poll_interval_secs"));
    }

    #[test]
    fn oversized_wait_timeout_is_error() {
        let mut cfg = AppConfig::default();
        cfg.deploy.wait_timeout_secs = u64::MAX;
        assert!(cfg.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn catalog_url_flag_selects_remote() {
        let mut cfg = AppConfig::default();
        cfg.catalog.source = CatalogSource::Builtin;

        let mut flags = args();
        flags.catalog_url = Some("http://10.0.0.5:9000".into());
        let cfg = cfg.with_overrides(&flags);

        assert_eq!(cfg.catalog.source, CatalogSource::Remote);
        assert_eq!(cfg.catalog.base_url, "http://10.0.0.5:9000");
    }

    #[test]
    fn offline_flag_selects_builtin() {
        let mut flags = args();
        flags.offline = true;
        let cfg = AppConfig::default().with_overrides(&flags);
        assert_eq!(cfg.catalog.source, CatalogSource::Builtin);
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
