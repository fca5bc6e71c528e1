//! Shared utilities for stock-dash
//!
//! This crate provides the functionality shared by the dashboard binaries:
//! tracing setup and the runtime configuration (listen address, log format).

pub mod config;
pub mod logging;

pub use config::{Config, ConfigError};
pub use logging::{LogFormat, init_tracing};
