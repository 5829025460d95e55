//! HTTP Server Configuration
//!
//! Host, port, rules file, body size limit and CORS settings. Values come
//! from an optional JSON file, then CLI flags, then the `PORT` variable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the configured port
pub const PORT_ENV: &str = "PORT";

/// Configuration load failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config '{path}': {reason}")]
    Read {
        /// Config file path
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Config file is not valid JSON for this shape
    #[error("invalid config JSON in '{path}': {reason}")]
    Parse {
        /// Config file path
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// A field holds an unusable value
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Offending field or variable
        field: String,
        /// What was wrong with it
        reason: String,
    },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Rules document loaded at startup (default: "./rules.json")
    #[serde(default = "default_rules_path")]
    pub rules_path: PathBuf,

    /// Largest request body read for validation (default: 1 MiB)
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    /// CORS allowed origins (default: empty, any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_rules_path() -> PathBuf {
    PathBuf::from("./rules.json")
}

fn default_body_limit() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            rules_path: default_rules_path(),
            body_limit_bytes: default_body_limit(),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let display = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: display.clone(),
            reason: e.to_string(),
        })?;

        let config: ServerConfig = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display,
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply the `PORT` environment variable, if set.
    pub fn apply_env(self) -> ConfigResult<Self> {
        let port = std::env::var(PORT_ENV).ok();
        self.with_port_override(port.as_deref())
    }

    /// Replace the port with a textual override, if given.
    pub fn with_port_override(mut self, port: Option<&str>) -> ConfigResult<Self> {
        if let Some(raw) = port {
            self.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                field: PORT_ENV.to_string(),
                reason: format!("'{}' is not a port number", raw),
            })?;
        }
        Ok(self)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "body_limit_bytes".to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
