//! Configuration for market data retrieval

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tickers shown in the form before the user types anything
pub const DEFAULT_TICKERS: &str = "PETR4.SA, VALE3.SA";

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com";
const SUMMARY_BASE_URL: &str = "https://query2.finance.yahoo.com";
const COOKIE_URL: &str = "https://fc.yahoo.com";
const CRUMB_URL: &str = "https://query1.finance.yahoo.com/v1/test/getcrumb";
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Configuration for market data retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Fixed timeout applied to every provider call
    pub request_timeout: Duration,

    /// Base URL of the chart (price history) endpoint
    pub chart_base_url: String,

    /// Base URL of the quote summary (metadata) endpoint
    pub summary_base_url: String,

    /// URL visited once to obtain session cookies
    pub cookie_url: String,

    /// URL returning the crumb token paired with the session cookies
    pub crumb_url: String,

    /// User agent sent with every request
    pub user_agent: String,

    /// Comma separated tickers pre-filled in the form
    pub default_tickers: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            chart_base_url: CHART_BASE_URL.to_string(),
            summary_base_url: SUMMARY_BASE_URL.to_string(),
            cookie_url: COOKIE_URL.to_string(),
            crumb_url: CRUMB_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            default_tickers: DEFAULT_TICKERS.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Configuration with every Yahoo endpoint rooted at `base`
    ///
    /// Used to point the client at a local mock server.
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            chart_base_url: base.to_string(),
            summary_base_url: base.to_string(),
            cookie_url: format!("{base}/cookie"),
            crumb_url: format!("{base}/v1/test/getcrumb"),
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(DashError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        for (name, value) in [
            ("chart_base_url", &self.chart_base_url),
            ("summary_base_url", &self.summary_base_url),
            ("cookie_url", &self.cookie_url),
            ("crumb_url", &self.crumb_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| DashError::ConfigError(format!("{name} is not a valid URL: {e}")))?;
        }

        if self.default_tickers.trim().is_empty() {
            return Err(DashError::ConfigError(
                "default_tickers must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    request_timeout: Option<Duration>,
    chart_base_url: Option<String>,
    summary_base_url: Option<String>,
    cookie_url: Option<String>,
    crumb_url: Option<String>,
    user_agent: Option<String>,
    default_tickers: Option<String>,
}

impl DashboardConfigBuilder {
    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the chart endpoint base URL
    pub fn chart_base_url(mut self, url: impl Into<String>) -> Self {
        self.chart_base_url = Some(url.into());
        self
    }

    /// Set the quote summary endpoint base URL
    pub fn summary_base_url(mut self, url: impl Into<String>) -> Self {
        self.summary_base_url = Some(url.into());
        self
    }

    /// Set the cookie URL
    pub fn cookie_url(mut self, url: impl Into<String>) -> Self {
        self.cookie_url = Some(url.into());
        self
    }

    /// Set the crumb URL
    pub fn crumb_url(mut self, url: impl Into<String>) -> Self {
        self.crumb_url = Some(url.into());
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the tickers pre-filled in the form
    pub fn default_tickers(mut self, tickers: impl Into<String>) -> Self {
        self.default_tickers = Some(tickers.into());
        self
    }

    /// Load `STOCK_DASH_TIMEOUT_SECS` and `STOCK_DASH_TICKERS` from the environment
    pub fn with_env(self) -> Self {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides through an arbitrary lookup function
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secs) = lookup("STOCK_DASH_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self.request_timeout = Some(Duration::from_secs(secs)),
                Err(e) => tracing::warn!("ignoring STOCK_DASH_TIMEOUT_SECS={secs}: {e}"),
            }
        }
        if let Some(tickers) = lookup("STOCK_DASH_TICKERS") {
            self.default_tickers = Some(tickers);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            chart_base_url: self.chart_base_url.unwrap_or(defaults.chart_base_url),
            summary_base_url: self.summary_base_url.unwrap_or(defaults.summary_base_url),
            cookie_url: self.cookie_url.unwrap_or(defaults.cookie_url),
            crumb_url: self.crumb_url.unwrap_or(defaults.crumb_url),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            default_tickers: self.default_tickers.unwrap_or(defaults.default_tickers),
        };

        config.validate()?;
        Ok(config)
    }
}
