//! Runtime configuration shared by the binaries

use crate::logging::LogFormat;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;

/// Environment variable holding the web listen address
pub const ADDR_ENV: &str = "STOCK_DASH_ADDR";
/// Environment variable holding the log format (`pretty` or `json`)
pub const LOG_FORMAT_ENV: &str = "STOCK_DASH_LOG_FORMAT";

/// Errors raised while loading [`Config`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid listen address '{0}'")]
    InvalidAddr(String),

    #[error("{0}")]
    InvalidLogFormat(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Address the web dashboard binds to
    pub listen_addr: SocketAddr,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-dash".to_string(),
            environment: "development".to_string(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load overrides from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through an arbitrary lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(ADDR_ENV) {
            config.listen_addr = addr
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddr(addr.clone()))?;
        }

        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config.log_format = format.parse().map_err(ConfigError::InvalidLogFormat)?;
        }

        if let Some(env) = lookup("STOCK_DASH_ENV") {
            config.environment = env;
        }

        Ok(config)
    }
}
