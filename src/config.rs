//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `BSKY_APP_PASSWORD`. A missing file
//! yields defaults so a run can be driven entirely by CLI flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

use crate::account::Credentials;
use crate::domain::{DomainError, RetentionPolicy};
use crate::error::{ConfigError, Result};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountConfig {
    /// Base url of the PDS hosting the account.
    #[serde(default = "default_service")]
    pub service: String,
    /// Handle or DID to log in as. `BSKY_IDENTIFIER` overrides.
    #[serde(default)]
    pub identifier: String,
    /// App password, loaded from `BSKY_APP_PASSWORD` at runtime (never from
    /// the config file).
    #[serde(skip)]
    pub app_password: Option<String>,
}

fn default_service() -> String {
    "https://bsky.social".to_string()
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            identifier: String::new(),
            app_password: None,
        }
    }
}

/// Retention thresholds as configured; zero means disabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// Delete posts with strictly more reposts than this.
    #[serde(default)]
    pub max_reposts: u32,
    /// Delete posts and remove likes at least this many whole days old.
    #[serde(default)]
    pub stale_limit_days: u32,
    /// Posts linking to these domains are never deleted.
    #[serde(default)]
    pub protected_domains: Vec<String>,
    /// Likes cursor at which pagination stops early; unbounded lookback
    /// through an already-purged history is prohibitively slow.
    #[serde(default)]
    pub fixed_likes_cursor: Option<String>,
}

impl PolicyConfig {
    /// At least one threshold enabled.
    pub fn sweep_enabled(&self) -> bool {
        self.max_reposts > 0 || self.stale_limit_days > 0
    }

    pub fn retention_policy(&self) -> std::result::Result<RetentionPolicy, DomainError> {
        RetentionPolicy::try_new(
            self.max_reposts,
            self.stale_limit_days,
            self.protected_domains.iter().cloned(),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Directory archives are written under, one subdirectory per DID.
    #[serde(default = "default_archive_root")]
    pub root: PathBuf,
    /// Skip the pre-sweep archive download.
    #[serde(default)]
    pub skip: bool,
}

fn default_archive_root() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("skysweep").join("archive"))
        .unwrap_or_else(|| PathBuf::from("archive"))
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            root: default_archive_root(),
            skip: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunConfig {
    /// Skip confirmation prompts.
    #[serde(default)]
    pub auto_confirm: bool,
    /// Compute and report the plan without mutating anything.
    #[serde(default)]
    pub dry_run: bool,
    /// Download the archive and exit without sweeping.
    #[serde(default)]
    pub archive_only: bool,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from `path`, then merge environment overrides.
    /// Validation is separate so CLI overrides can apply in between.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        } else {
            Config::default()
        };

        if let Ok(identifier) = std::env::var("BSKY_IDENTIFIER") {
            config.account.identifier = identifier;
        }
        config.account.app_password = std::env::var("BSKY_APP_PASSWORD").ok();

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.account.service.is_empty() {
            return Err(ConfigError::MissingField {
                field: "account.service",
            }
            .into());
        }
        if self.account.identifier.is_empty() {
            return Err(ConfigError::MissingField {
                field: "account.identifier",
            }
            .into());
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: format!("unknown level '{}'", self.logging.level),
            }
            .into());
        }
        if self.logging.format != "pretty" && self.logging.format != "json" {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            }
            .into());
        }
        // A sweep with no threshold would silently be a no-op; surface it
        // before any network call.
        if !self.run.archive_only && !self.policy.sweep_enabled() {
            return Err(ConfigError::InvalidValue {
                field: "policy",
                reason: "no retention threshold enabled; set max_reposts or stale_limit_days, \
                         or pass --archive-only"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    pub fn credentials(&self) -> Result<Credentials> {
        if self.account.identifier.is_empty() {
            return Err(ConfigError::MissingField {
                field: "account.identifier",
            }
            .into());
        }
        let password = self
            .account
            .app_password
            .clone()
            .ok_or(ConfigError::MissingField {
                field: "BSKY_APP_PASSWORD",
            })?;
        Ok(Credentials {
            identifier: self.account.identifier.clone(),
            password,
        })
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));
        if self.logging.format == "json" {
            fmt().with_env_filter(filter).json().init();
        } else {
            fmt().with_env_filter(filter).init();
        }
    }
}
