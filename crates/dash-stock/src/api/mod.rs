//! Market data providers

pub mod yahoo;

use async_trait::async_trait;

use crate::error::Result;
use crate::period::DateRange;
use crate::series::PriceSeries;
use crate::valuation::TickerInfo;

pub use yahoo::YahooFinanceClient;

/// Source of daily price history and company metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily closes for `symbol` within `range` (both ends inclusive)
    ///
    /// An empty series is a valid answer when nothing traded in the range.
    async fn history(&self, symbol: &str, range: DateRange) -> Result<PriceSeries>;

    /// Metadata record for `symbol`
    async fn info(&self, symbol: &str) -> Result<TickerInfo>;
}
