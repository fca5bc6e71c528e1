//! Yahoo Finance API client

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use url::Url;

use super::MarketDataProvider;
use crate::config::DashboardConfig;
use crate::error::{DashError, Result};
use crate::period::DateRange;
use crate::series::{PricePoint, PriceSeries};
use crate::valuation::TickerInfo;

const SUMMARY_MODULES: &str = "price,summaryDetail,defaultKeyStatistics";

/// Yahoo Finance API client
///
/// Price history comes from the v8 chart endpoint, metadata from the v10
/// quote summary endpoint. The latter needs a crumb bound to the session
/// cookies; it is fetched on first use and reused until Yahoo rejects it.
#[derive(Debug)]
pub struct YahooFinanceClient {
    client: Client,
    config: DashboardConfig,
    crumb: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    description: Option<String>,
}

impl ApiErrorBody {
    fn into_error(self, symbol: &str) -> DashError {
        if self.code == "Not Found" {
            return DashError::InvalidSymbol(symbol.to_string());
        }
        match self.description {
            Some(description) => {
                DashError::YahooFinanceError(format!("{}: {}", self.code, description))
            },
            None => DashError::YahooFinanceError(self.code),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResponse {
    quote_summary: SummaryBody,
}

#[derive(Debug, Deserialize)]
struct SummaryBody {
    result: Option<Vec<SummaryResult>>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryResult {
    #[serde(default)]
    price: PriceModule,
    #[serde(default)]
    summary_detail: SummaryDetailModule,
    #[serde(default)]
    default_key_statistics: KeyStatisticsModule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    long_name: Option<String>,
    short_name: Option<String>,
    currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    #[serde(rename = "trailingPE")]
    trailing_pe: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
    dividend_yield: Option<RawValue>,
    payout_ratio: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyStatisticsModule {
    price_to_book: Option<RawValue>,
    #[serde(rename = "forwardPE")]
    forward_pe: Option<RawValue>,
}

/// `{"raw": 4.5, "fmt": "4.50"}`; Yahoo sends `{}` for unknown values
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

impl From<SummaryResult> for TickerInfo {
    fn from(result: SummaryResult) -> Self {
        let forward_pe = raw(result.summary_detail.forward_pe)
            .or_else(|| raw(result.default_key_statistics.forward_pe));

        TickerInfo {
            long_name: result.price.long_name,
            short_name: result.price.short_name,
            logo_url: None,
            currency: result.price.currency,
            trailing_pe: raw(result.summary_detail.trailing_pe),
            forward_pe,
            price_to_book: raw(result.default_key_statistics.price_to_book),
            dividend_yield: raw(result.summary_detail.dividend_yield),
            payout_ratio: raw(result.summary_detail.payout_ratio),
        }
    }
}

/// `base` with `segments` appended as percent-encoded path segments
fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| DashError::ConfigError(format!("{base} cannot be a base URL")))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(config: DashboardConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            crumb: RwLock::new(None),
        })
    }

    fn send_error(&self, err: reqwest::Error) -> DashError {
        if err.is_timeout() {
            DashError::Timeout(self.config.request_timeout.as_secs())
        } else {
            DashError::NetworkError(err)
        }
    }

    /// Get daily closes for a symbol
    pub async fn get_daily_closes(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        if range.is_inverted() {
            tracing::debug!(symbol, %range, "inverted range, nothing to fetch");
            return Ok(PriceSeries::default());
        }

        let period1 = range.start.and_time(NaiveTime::MIN).and_utc().timestamp();
        // period2 is exclusive; move past the end date so it is included
        let period2 = range
            .end
            .succ_opt()
            .unwrap_or(range.end)
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();

        let url = endpoint(&self.config.chart_base_url, &["v8", "finance", "chart", symbol])?;
        tracing::debug!(symbol, %range, "fetching price history");

        let response = self
            .client
            .get(url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.send_error(e))?;
        let parsed: ChartResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(DashError::YahooFinanceError(format!("HTTP error: {status}")));
            },
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = parsed.chart.error {
            return Err(error.into_error(symbol));
        }
        if !status.is_success() {
            return Err(DashError::YahooFinanceError(format!("HTTP error: {status}")));
        }

        let Some(result) = parsed.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(PriceSeries::default());
        };

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();
        let offset = result.meta.gmtoffset;

        let points: Vec<PricePoint> = result
            .timestamp
            .iter()
            .zip(closes)
            .filter_map(|(&ts, close)| {
                let close = close.filter(|c| c.is_finite())?;
                let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
                Some(PricePoint::new(date, close))
            })
            .filter(|p| p.date >= range.start && p.date <= range.end)
            .collect();

        tracing::debug!(symbol, points = points.len(), "price history received");
        Ok(PriceSeries::new(points))
    }

    async fn fetch_crumb(&self) -> Result<String> {
        // Only the cookies matter; this endpoint usually answers 404
        let _ = self
            .client
            .get(&self.config.cookie_url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let response = self
            .client
            .get(&self.config.crumb_url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            return Err(DashError::YahooFinanceError(format!(
                "crumb request failed: {}",
                response.status()
            )));
        }

        let crumb = response.text().await.map_err(|e| self.send_error(e))?;
        let crumb = crumb.trim();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(DashError::YahooFinanceError("empty crumb".to_string()));
        }

        tracing::debug!("obtained Yahoo crumb");
        Ok(crumb.to_string())
    }

    /// The cached crumb, fetching one if there is none yet
    async fn session_crumb(&self) -> Result<String> {
        if let Some(crumb) = self.crumb.read().await.as_ref() {
            return Ok(crumb.clone());
        }

        let mut slot = self.crumb.write().await;
        if let Some(crumb) = slot.as_ref() {
            return Ok(crumb.clone());
        }
        let crumb = self.fetch_crumb().await?;
        *slot = Some(crumb.clone());
        Ok(crumb)
    }

    /// Replace `stale` with a fresh crumb
    ///
    /// When another request already swapped it out, that crumb is reused.
    async fn refresh_crumb(&self, stale: &str) -> Result<String> {
        let mut slot = self.crumb.write().await;
        if let Some(current) = slot.as_ref().filter(|c| c.as_str() != stale) {
            return Ok(current.clone());
        }
        *slot = None;
        let crumb = self.fetch_crumb().await?;
        *slot = Some(crumb.clone());
        Ok(crumb)
    }

    async fn request_summary(&self, url: &Url, crumb: &str) -> Result<reqwest::Response> {
        self.client
            .get(url.clone())
            .query(&[("modules", SUMMARY_MODULES), ("crumb", crumb)])
            .send()
            .await
            .map_err(|e| self.send_error(e))
    }

    /// Get company information
    ///
    /// A rejected crumb is refreshed once and the request retried.
    pub async fn get_company_info(&self, symbol: &str) -> Result<TickerInfo> {
        let url = endpoint(
            &self.config.summary_base_url,
            &["v10", "finance", "quoteSummary", symbol],
        )?;
        tracing::debug!(symbol, "fetching quote summary");

        let crumb = self.session_crumb().await?;
        let mut response = self.request_summary(&url, &crumb).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!(symbol, "session crumb rejected, refreshing");
            let crumb = self.refresh_crumb(&crumb).await?;
            response = self.request_summary(&url, &crumb).await?;
        }

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(DashError::YahooFinanceError(
                "quote summary rejected the session crumb".to_string(),
            ));
        }

        let body = response.text().await.map_err(|e| self.send_error(e))?;
        let parsed: SummaryResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(DashError::YahooFinanceError(format!("HTTP error: {status}")));
            },
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = parsed.quote_summary.error {
            return Err(error.into_error(symbol));
        }

        let result = parsed
            .quote_summary
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| DashError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "empty quote summary".to_string(),
            })?;

        Ok(result.into())
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    async fn history(&self, symbol: &str, range: DateRange) -> Result<PriceSeries> {
        self.get_daily_closes(symbol, range).await
    }

    async fn info(&self, symbol: &str) -> Result<TickerInfo> {
        self.get_company_info(symbol).await
    }
}
