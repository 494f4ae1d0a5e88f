//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};

/// Liveness payload for `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Request body for `POST /analyze`.
///
/// `message` is optional here so that a missing field is reported as a
/// validation failure rather than a deserialization error.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response body for `POST /analyze`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    pub user_input: String,
    pub ai_response: String,
}
