//! Single round trip to the inference service.

use std::time::Instant;

use async_trait::async_trait;
use firstaid_config::ProxyConfig;
use firstaid_core::{Advice, AdviceError, AdviceService, Query};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::ollama::{GenerateRequest, GenerateResponse};
use crate::prompt::build_prompt;

/// Longest slice of an error body carried into a transport error.
const ERROR_BODY_LIMIT: usize = 200;

/// Forwards templated queries to Ollama's generate endpoint.
///
/// Holds only immutable configuration and a pooled HTTP client, so one
/// instance is shared by every concurrent caller.
#[derive(Debug, Clone)]
pub struct InferenceProxy {
    client: Client,
    config: ProxyConfig,
}

impl InferenceProxy {
    /// Creates a proxy whose client enforces `config.timeout` on every call.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Sends a validated query and returns the trimmed completion.
    pub async fn ask(&self, query: &Query) -> Result<String, AdviceError> {
        let request = GenerateRequest::new(&self.config.model, build_prompt(query.message()));
        let start = Instant::now();

        debug!(endpoint = %self.config.endpoint, model = %self.config.model, "Sending generate request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdviceError::Transport(format!(
                "unexpected status {}: {}",
                status,
                truncate(body.trim(), ERROR_BODY_LIMIT)
            )));
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        let parsed: GenerateResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AdviceError::Transport(format!("malformed response: {}", e)))?;

        info!(
            "Ollama: {}ms elapsed, {:.1} tok/s, {} eval tokens",
            start.elapsed().as_millis(),
            parsed.metrics.tokens_per_sec(),
            parsed.metrics.eval_count
        );

        Ok(parsed.response.trim().to_string())
    }

    /// Maps a transport failure onto the connection/timeout/transport split.
    fn classify(&self, err: reqwest::Error) -> AdviceError {
        if err.is_timeout() {
            AdviceError::Timeout { secs: self.config.timeout.as_secs() }
        } else if err.is_connect() {
            AdviceError::Connection {
                endpoint: self.config.endpoint.clone(),
                detail: err.to_string(),
            }
        } else {
            AdviceError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl AdviceService for InferenceProxy {
    async fn generate_advice(&self, message: &str) -> Result<Advice, AdviceError> {
        let query = Query::new(message)?;

        match self.ask(&query).await {
            Ok(assistant_text) => Ok(Advice {
                original_message: query.into_message(),
                assistant_text,
            }),
            Err(e) => {
                warn!(kind = %e.kind(), "Inference request failed: {}", e);
                Err(e)
            }
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
