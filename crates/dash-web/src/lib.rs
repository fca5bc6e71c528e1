//! Browser front end for the stock analysis dashboard
//!
//! Serves a form (tickers and period) and the rendered analysis: one tab per
//! ticker with its price history, valuation listing and radar chart, plus a
//! panel of per-ticker warnings. The same report is also exposed as JSON.
//!
//! | Route              | Response                         |
//! |--------------------|----------------------------------|
//! | `GET /`            | empty form                       |
//! | `GET /analyze`     | form plus rendered report        |
//! | `GET /api/analyze` | [`dash_stock::AnalysisReport`]   |
//! | `GET /api/health`  | liveness message                 |

pub mod error;
pub mod query;
pub mod routes;
pub mod state;
pub mod templates;

pub use error::{Message, Result, WebError};
pub use query::AnalyzeQuery;
pub use routes::make_app;
pub use state::AppState;
pub use templates::{FormView, Templates, render_html};

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Bind `addr` and serve the dashboard until the process stops
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "dashboard listening");
    axum::serve(listener, make_app(state)).await
}
