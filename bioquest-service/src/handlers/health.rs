use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. Upstream APIs are deliberately not contacted here.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "bioquest-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}
