//! Shared application state

use dash_stock::{Dashboard, MarketDataProvider};
use std::sync::Arc;

use crate::error::Result;
use crate::templates::Templates;

/// Read-only state handed to every handler
pub struct AppState {
    pub dashboard: Dashboard<dyn MarketDataProvider>,
    pub templates: Templates,
    /// Prefilled ticker list of the form
    pub default_tickers: String,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        default_tickers: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            dashboard: Dashboard::new(provider),
            templates: Templates::new()?,
            default_tickers: default_tickers.into(),
        })
    }
}
