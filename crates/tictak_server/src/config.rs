//! Process configuration: TOML file, then environment overrides.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Environment variable overriding [`Config::host`].
pub const HOST_VAR: &str = "TICTAK_HOST";
/// Environment variable overriding [`Config::port`].
pub const PORT_VAR: &str = "TICTAK_PORT";
/// Environment variable overriding [`Config::log_filter`].
pub const LOG_VAR: &str = "TICTAK_LOG";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP transport binds to.
    #[serde(default = "default_host")]
    host: String,

    /// Port the HTTP transport binds to.
    #[serde(default = "default_port")]
    port: u16,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Bot username accepted in `/command@bot_name`.
    #[serde(default = "default_bot_name")]
    bot_name: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_filter() -> String {
    "info,tictak_server=debug".to_string()
}

fn default_bot_name() -> String {
    "tictak_bot".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_filter: default_log_filter(),
            bot_name: default_bot_name(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists (defaults otherwise), then applies
    /// overrides from the process environment.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = if path.exists() {
            Self::from_file(path)?
        } else {
            info!("Config file not found, using defaults");
            Self::default()
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `TICTAK_*` overrides read through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(HOST_VAR) {
            debug!(%host, "Overriding host from environment");
            self.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.port = port.trim().parse().map_err(|e| {
                ConfigError::new(format!("Invalid {} value {:?}: {}", PORT_VAR, port, e))
            })?;
            debug!(port = self.port, "Overriding port from environment");
        }
        if let Some(filter) = lookup(LOG_VAR) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    /// Replaces the listen address with any values given on the command line.
    pub fn with_listen(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}
