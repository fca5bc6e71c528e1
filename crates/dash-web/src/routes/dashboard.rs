//! HTML pages

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Html;
use std::sync::Arc;

use crate::error::Result;
use crate::query::AnalyzeQuery;
use crate::state::AppState;
use crate::templates::FormView;

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// Empty form with defaults
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let form = FormView::defaults(&state.default_tickers, today());
    Ok(Html(state.templates.render_dashboard(&form, None)?))
}

/// Run the analysis and render it below the submitted form
pub async fn analyze_page(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<AnalyzeQuery>, QueryRejection>,
) -> Result<Html<String>> {
    let Query(query) = query?;
    let today = today();
    let request = query.to_request(&state.default_tickers, today)?;

    let report = state.dashboard.analyze_on(&request, today).await;
    let form = FormView::from_request(&request, today);
    Ok(Html(state.templates.render_dashboard(&form, Some(&report))?))
}

/// Same pipeline, JSON out
pub async fn analyze_json(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<AnalyzeQuery>, QueryRejection>,
) -> Result<axum::Json<dash_stock::AnalysisReport>> {
    let Query(query) = query?;
    let today = today();
    let request = query.to_request(&state.default_tickers, today)?;
    Ok(axum::Json(state.dashboard.analyze_on(&request, today).await))
}
