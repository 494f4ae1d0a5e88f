//! HTTP route handlers for the assistant server.

pub mod analyze;

use axum::Json;

use crate::dto::StatusResponse;

/// Liveness endpoint.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running",
        message: "Emergency Health Assistant API",
    })
}
