//! Dashboard configuration.
//!
//! | Key (file) | Env | Default | Description |
//! |------------|-----|---------|-------------|
//! | backend_url | COMPOUND__BACKEND_URL | http://localhost:8000 | Stock backend base address. |
//! | request_timeout_secs | COMPOUND__REQUEST_TIMEOUT_SECS | unset | Activation timeout; unset or 0 waits indefinitely. |
//! | log_dir | COMPOUND__LOG_DIR | logs | Rolling log directory for the TUI. |
//! | log_level | COMPOUND__LOG_LEVEL | info | Filter used when RUST_LOG is unset. |
//!
//! Precedence: environment > file (`COMPOUND_CONFIG`, default `config/compound.toml`) > defaults.

use crate::backend::PROCESS_STOCK_PATH;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONFIG_PATH: &str = "config/compound.toml";
const ENV_PREFIX: &str = "COMPOUND";

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            request_timeout_secs: None,
            log_dir: default_log_dir(),
            log_level: default_log_level(),
        }
    }
}

impl DashboardConfig {
    /// Load from `COMPOUND_CONFIG` (or `config/compound.toml`) and `COMPOUND__*` env vars.
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var("COMPOUND_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path), None)
    }

    /// Load from an explicit file path. `env` replaces the process environment
    /// as the override source when given.
    pub fn load_from(
        path: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .set_default("backend_url", DEFAULT_BACKEND_URL)?
            .set_default("log_dir", default_log_dir())?
            .set_default("log_level", default_log_level())?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(env),
            )
            .build()?;

        let loaded: Self = built.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject backend addresses reqwest could never reach.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend_url.trim();
        let has_host = url
            .strip_prefix("http://")
            .or_else(|| url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.trim_matches('/').is_empty());
        if has_host {
            Ok(())
        } else {
            Err(ConfigError::BackendUrl(self.backend_url.clone()))
        }
    }

    /// Full URL of the activation endpoint.
    pub fn process_stock_url(&self) -> String {
        format!(
            "{}{}",
            self.backend_url.trim().trim_end_matches('/'),
            PROCESS_STOCK_PATH
        )
    }

    /// `None` means wait indefinitely.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}
