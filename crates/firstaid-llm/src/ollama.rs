//! Wire types for Ollama's native `/api/generate` endpoint.

use serde::{Deserialize, Serialize};

/// Body of a non-streaming generate request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: String,
    stream: bool,
}

impl<'a> GenerateRequest<'a> {
    /// Creates a request that waits for the complete generation.
    pub fn new(model: &'a str, prompt: String) -> Self {
        Self { model, prompt, stream: false }
    }

    pub fn stream(&self) -> bool {
        self.stream
    }
}

/// Timing and token counts reported alongside a generation.
///
/// Durations are in nanoseconds, as Ollama reports them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateMetrics {
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub load_duration: u64,
    #[serde(default)]
    pub prompt_eval_count: u32,
    #[serde(default)]
    pub eval_count: u32,
    #[serde(default)]
    pub eval_duration: u64,
}

impl GenerateMetrics {
    /// Calculates tokens generated per second.
    pub fn tokens_per_sec(&self) -> f64 {
        if self.eval_duration == 0 {
            return 0.0;
        }
        (self.eval_count as f64) / (self.eval_duration as f64 / 1_000_000_000.0)
    }

    /// Total request duration in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        self.total_duration / 1_000_000
    }

    /// Model load time in milliseconds.
    pub fn load_duration_ms(&self) -> u64 {
        self.load_duration / 1_000_000
    }
}

/// Reply to a non-streaming generate request.
///
/// A missing `response` field decodes as empty text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    #[serde(flatten)]
    pub metrics: GenerateMetrics,
}
