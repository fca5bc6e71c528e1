//! Per-ticker retrieval with isolated failures

use serde::Serialize;

use crate::api::MarketDataProvider;
use crate::period::TickerRequest;
use crate::series::PriceSeries;
use crate::valuation::TickerInfo;

/// Data retrieved for one ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerData {
    pub symbol: String,
    pub info: TickerInfo,
    pub history: PriceSeries,
}

/// Result of one retrieval pass
///
/// A symbol appears either in `data` or in `errors`, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchOutcome {
    /// Successes in request order
    pub data: Vec<TickerData>,
    /// One human readable line per failed ticker
    pub errors: Vec<String>,
}

impl FetchOutcome {
    pub fn get(&self, symbol: &str) -> Option<&TickerData> {
        self.data.iter().find(|d| d.symbol == symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.data.iter().map(|d| d.symbol.as_str())
    }
}

pub fn no_data_message(symbol: &str) -> String {
    format!("{symbol}: no data found in the selected range.")
}

pub fn fetch_error_message(symbol: &str, reason: &impl std::fmt::Display) -> String {
    format!("{symbol}: error fetching data ({reason}).")
}

/// Fetch history and metadata for every request, one after another
///
/// Metadata is only requested once a non-empty history came back. Any
/// failure is recorded and the next ticker is tried. A repeated symbol is
/// fetched once; later requests for it are skipped.
pub async fn fetch_tickers<P>(provider: &P, requests: &[TickerRequest]) -> FetchOutcome
where
    P: MarketDataProvider + ?Sized,
{
    let mut outcome = FetchOutcome::default();
    let mut seen: Vec<&str> = Vec::with_capacity(requests.len());

    for TickerRequest { symbol, range } in requests {
        let (symbol, range) = (symbol.as_str(), *range);
        if seen.contains(&symbol) {
            tracing::debug!(symbol, "skipping repeated ticker");
            continue;
        }
        seen.push(symbol);
        tracing::debug!(symbol, %range, "fetching ticker");

        let history = match provider.history(symbol, range).await {
            Ok(history) if history.is_empty() => {
                tracing::warn!(symbol, %range, "no price history in range");
                outcome.errors.push(no_data_message(symbol));
                continue;
            },
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(symbol, error = %e, "price history request failed");
                outcome.errors.push(fetch_error_message(symbol, &e));
                continue;
            },
        };

        match provider.info(symbol).await {
            Ok(info) => outcome.data.push(TickerData {
                symbol: symbol.to_string(),
                info,
                history,
            }),
            Err(e) => {
                tracing::warn!(symbol, error = %e, "metadata request failed");
                outcome.errors.push(fetch_error_message(symbol, &e));
            },
        }
    }

    tracing::info!(
        succeeded = outcome.data.len(),
        failed = outcome.errors.len(),
        "retrieval finished"
    );
    outcome
}
