mod dashboard;
mod health;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use health::health_checker_handler;

/// All dashboard routes with request tracing
pub fn make_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/analyze", get(dashboard::analyze_page))
        .route("/api/analyze", get(dashboard::analyze_json))
        .route("/api/health", get(health_checker_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use dash_stock::{DateRange, MarketDataProvider, PricePoint, PriceSeries, TickerInfo};
    use tower::ServiceExt;

    /// Knows only PETR4.SA
    struct StubProvider;

    #[async_trait]
    impl MarketDataProvider for StubProvider {
        async fn history(&self, symbol: &str, range: DateRange) -> dash_stock::Result<PriceSeries> {
            if symbol != "PETR4.SA" || range.is_inverted() {
                return Ok(PriceSeries::default());
            }
            let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
            Ok(PriceSeries::new(vec![
                PricePoint::new(day(2), 36.1),
                PricePoint::new(day(3), 37.9),
                PricePoint::new(day(6), 38.4),
            ]))
        }

        async fn info(&self, _symbol: &str) -> dash_stock::Result<TickerInfo> {
            Ok(TickerInfo {
                long_name: Some("Petrobras".to_string()),
                trailing_pe: Some(3.9),
                dividend_yield: Some(0.12),
                ..Default::default()
            })
        }
    }

    fn app() -> Router {
        let state = AppState::new(Arc::new(StubProvider), "PETR4.SA, VALE3.SA").unwrap();
        make_app(Arc::new(state))
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json["message"].as_str().unwrap().starts_with("OK"));
    }

    #[tokio::test]
    async fn test_index_shows_form() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("value=\"PETR4.SA, VALE3.SA\""));
        assert!(!body.contains("class=\"tab-panel"));
        assert!(body.contains("id=\"range-warning\" hidden>"));
    }

    #[tokio::test]
    async fn test_analyze_renders_tabs_and_warnings() {
        let (status, body) = get("/analyze?tickers=petr4.sa,%20xxxx3.sa&mode=preset&preset=7d").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("PETR4.SA - Petrobras"));
        assert!(body.contains("Logo not available for Petrobras"));
        assert!(body.contains("XXXX3.SA: no data found in the selected range."));
        assert!(body.contains("Plotly.newPlot(\"ticker-0-price\""));
        assert!(body.contains("Plotly.newPlot(\"ticker-0-radar\""));
        assert!(!body.contains("ticker-1"));
    }

    #[tokio::test]
    async fn test_analyze_inverted_range() {
        let (status, body) = get("/analyze?tickers=PETR4.SA&mode=custom&start=2024-05-10&end=2024-05-01").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("id=\"range-warning\">The start date must be before the end date."));
        assert!(body.contains("PETR4.SA: no data found in the selected range."));
        assert!(body.contains("value=\"2024-05-10\""));
    }

    #[tokio::test]
    async fn test_invalid_date_is_bad_request() {
        let (status, body) = get("/analyze?mode=custom&start=yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["message"], "invalid start date 'yesterday'");

        let (status, _) = get("/api/analyze?preset=5y").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_analyze_json() {
        let (status, body) = get("/api/analyze?tickers=PETR4.SA,BBAS3.SA&preset=90d").await;
        assert_eq!(status, StatusCode::OK);

        let report: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(report["tickers"], serde_json::json!(["PETR4.SA", "BBAS3.SA"]));
        assert_eq!(
            report["errors"],
            serde_json::json!(["BBAS3.SA: no data found in the selected range."])
        );

        let petr = &report["reports"][0];
        assert_eq!(petr["display_name"], "Petrobras");
        assert_eq!(petr["valuation"]["P/E (Price/Earnings)"], 3.9);
        assert_eq!(petr["price_chart"]["max"]["value"], 38.4);
        assert_eq!(petr["price_chart"]["latest"]["color"], "green");
    }
}
