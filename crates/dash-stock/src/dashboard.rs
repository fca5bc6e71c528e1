//! The "Analyze" command: inputs in, a renderable report out

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::MarketDataProvider;
use crate::chart::{PriceChart, RadarChart, build_price_chart, build_radar_chart};
use crate::fetch::{TickerData, fetch_tickers};
use crate::period::{DateRange, PeriodSelection, ticker_requests};
use crate::valuation::ValuationSnapshot;

/// What the user submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Comma separated ticker list as typed
    pub tickers: String,
    pub period: PeriodSelection,
}

impl AnalysisRequest {
    pub fn new(tickers: impl Into<String>, period: PeriodSelection) -> Self {
        Self {
            tickers: tickers.into(),
            period,
        }
    }
}

/// Everything shown for one successfully fetched ticker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerReport {
    pub symbol: String,
    pub display_name: String,
    pub logo_url: Option<String>,
    /// Shown instead of the logo when there is none
    pub logo_notice: Option<String>,
    pub currency: Option<String>,
    /// `None` when the history is empty; the view shows a warning instead
    pub price_chart: Option<PriceChart>,
    pub valuation: ValuationSnapshot,
    pub radar_chart: RadarChart,
}

impl TickerReport {
    /// Derive the presentation of one ticker's data
    pub fn build(data: &TickerData) -> Self {
        let display_name = data.info.display_name(&data.symbol);
        let logo_url = data.info.logo_url.clone().filter(|url| !url.trim().is_empty());
        let logo_notice = logo_url
            .is_none()
            .then(|| format!("Logo not available for {display_name}"));
        let valuation = ValuationSnapshot::from_info(&data.info);

        Self {
            symbol: data.symbol.clone(),
            price_chart: build_price_chart(&data.history, &data.symbol),
            radar_chart: build_radar_chart(&valuation, &display_name),
            valuation,
            logo_url,
            logo_notice,
            currency: data.info.currency.clone(),
            display_name,
        }
    }

    /// `"{symbol} - {name}"`
    pub fn header(&self) -> String {
        format!("{} - {}", self.symbol, self.display_name)
    }

    pub fn no_history_warning(&self) -> String {
        format!("No historical data available for {}.", self.symbol)
    }
}

/// Result of one "Analyze" action, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub tickers: Vec<String>,
    pub range: DateRange,
    /// Inline message when the custom range is inverted
    pub range_warning: Option<String>,
    pub errors: Vec<String>,
    pub reports: Vec<TickerReport>,
}

impl AnalysisReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Runs the fetch-and-derive pipeline against a provider
pub struct Dashboard<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> Clone for Dashboard<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P> Dashboard<P>
where
    P: MarketDataProvider + ?Sized,
{
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Run the request with periods resolved against `today`
    ///
    /// An inverted range is reported but still fetched.
    pub async fn analyze_on(&self, request: &AnalysisRequest, today: NaiveDate) -> AnalysisReport {
        let range = request.period.resolve(today);
        let range_warning = range.validation_warning().map(str::to_string);
        let requests = ticker_requests(&request.tickers, range);
        let tickers: Vec<String> = requests.iter().map(|r| r.symbol.clone()).collect();

        if let Some(warning) = &range_warning {
            tracing::warn!(%range, "{warning}");
        }
        tracing::info!(tickers = ?tickers, %range, "running analysis");

        let outcome = fetch_tickers(self.provider.as_ref(), &requests).await;
        let reports = outcome.data.iter().map(TickerReport::build).collect();

        AnalysisReport {
            tickers,
            range,
            range_warning,
            errors: outcome.errors,
            reports,
        }
    }

    /// Run the request with periods resolved against the local date
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisReport {
        self.analyze_on(request, chrono::Local::now().date_naive()).await
    }
}
