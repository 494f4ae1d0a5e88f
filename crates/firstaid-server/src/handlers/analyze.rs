//! Query endpoint forwarding a message to the inference proxy.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use firstaid_core::Query;
use tracing::info;

use crate::dto::{AnalyzeRequest, AnalyzeResponse};
use crate::error::AppError;
use crate::ServerState;

/// Validates the payload, asks the model, and echoes the input with the reply.
pub async fn analyze(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let query = Query::new(req.message.unwrap_or_default())?;

    let message = query.message();
    info!(
        "Analyze request: {}...",
        message.get(..50).unwrap_or(message)
    );

    let advice = state.advisor.generate_advice(message).await?;

    Ok(Json(AnalyzeResponse {
        user_input: advice.original_message,
        ai_response: advice.assistant_text,
    }))
}
