//! Stock analysis dashboard core
//!
//! This crate turns a list of ticker symbols and a period into everything a
//! dashboard needs to draw:
//!
//! - Daily closing prices and company metadata from Yahoo Finance
//! - Price history charts with max/min reference lines and a latest-close marker
//! - Valuation snapshots (P/E, forward P/E, P/B, dividend yield, payout ratio)
//!   and the matching radar chart
//! - Brazilian Real formatting for monetary values
//!
//! Failures are isolated per ticker and collected as warnings.
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_stock::{AnalysisRequest, Dashboard, DashboardConfig, PeriodSelection, YahooFinanceClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = YahooFinanceClient::new(DashboardConfig::default())?;
//!     let dashboard = Dashboard::new(Arc::new(client));
//!
//!     let request = AnalysisRequest::new("PETR4.SA, VALE3.SA", PeriodSelection::default());
//!     let report = dashboard.analyze(&request).await;
//!     println!("{}", dash_stock::render_text(&report));
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod format;
pub mod period;
pub mod report;
pub mod series;
pub mod valuation;

pub use api::{MarketDataProvider, YahooFinanceClient};
pub use config::{DashboardConfig, DashboardConfigBuilder};
pub use dashboard::{AnalysisReport, AnalysisRequest, Dashboard, TickerReport};
pub use error::{DashError, Result};
pub use fetch::{FetchOutcome, TickerData, fetch_tickers};
pub use format::{FormatKind, format_currency, format_value};
pub use period::{DateRange, PeriodSelection, Preset, TickerRequest, parse_tickers, ticker_requests};
pub use report::render_text;
pub use series::{PricePoint, PriceSeries};
pub use valuation::{TickerInfo, ValuationSnapshot};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::series::{PricePoint, PriceSeries};

    /// Consecutive daily closes starting on 2024-01-01
    pub(crate) fn series(closes: &[f64]) -> PriceSeries {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        first
            .iter_days()
            .zip(closes)
            .map(|(date, &close)| PricePoint::new(date, close))
            .collect()
    }
}
