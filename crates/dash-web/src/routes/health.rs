use axum::Json;
use axum::response::IntoResponse;

use crate::error::Message;

/// Liveness probe
pub async fn health_checker_handler() -> impl IntoResponse {
    Json(Message::new("OK, dashboard is running"))
}
