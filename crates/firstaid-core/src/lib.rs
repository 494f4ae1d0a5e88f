//! Core domain types and error definitions for firstaid.
//!
//! This crate provides the types shared by the inference proxy and its adapters:
//!
//! - [`Query`] — A validated, non-empty user message
//! - [`Advice`] — The original message paired with the generated reply
//! - [`AdviceError`] and [`FailureKind`] — Tagged failure outcomes
//! - [`AdviceService`] — The single operation every adapter depends on
//!
//! # Example
//!
//! ```rust
//! use firstaid_core::{FailureKind, Query};
//!
//! let query = Query::new("I burned my hand").unwrap();
//! assert_eq!(query.message(), "I burned my hand");
//!
//! let err = Query::new("   ").unwrap_err();
//! assert_eq!(err.kind(), FailureKind::Validation);
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by a single advice round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdviceError {
    /// The message was empty or whitespace-only; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The inference service could not be reached.
    #[error("Cannot connect to inference service at {endpoint}. Make sure Ollama is running (ollama serve)")]
    Connection { endpoint: String, detail: String },

    /// The inference service did not answer within the configured bound.
    #[error("Request timed out after {secs}s. The model took too long to respond")]
    Timeout { secs: u64 },

    /// Any other failure: unexpected status, malformed body, protocol error.
    #[error("Inference service error: {0}")]
    Transport(String),
}

impl AdviceError {
    /// Creates the validation error for an empty message.
    pub fn empty_message() -> Self {
        Self::Validation("Message cannot be empty".into())
    }

    /// Returns the failure classification, for callers that branch on kind.
    pub fn kind(&self) -> FailureKind {
        match self {
            AdviceError::Validation(_) => FailureKind::Validation,
            AdviceError::Connection { .. } => FailureKind::Connection,
            AdviceError::Timeout { .. } => FailureKind::Timeout,
            AdviceError::Transport(_) => FailureKind::Transport,
        }
    }
}

/// Classification of an [`AdviceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Validation,
    Connection,
    Timeout,
    Transport,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Validation => "validation",
            FailureKind::Connection => "connection",
            FailureKind::Timeout => "timeout",
            FailureKind::Transport => "transport",
        };
        f.write_str(label)
    }
}

/// A user message that is known to contain something besides whitespace.
///
/// The message is kept exactly as given; trimming is only used for the check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    message: String,
}

impl Query {
    /// Validates and wraps a raw message.
    pub fn new(message: impl Into<String>) -> Result<Self, AdviceError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(AdviceError::empty_message());
        }
        Ok(Self { message })
    }

    /// The message as the caller supplied it.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn into_message(self) -> String {
        self.message
    }
}

/// Outcome of a successful round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    /// The message that was submitted.
    pub original_message: String,
    /// Generated text with surrounding whitespace removed.
    pub assistant_text: String,
}

/// The one operation both adapters are built on.
///
/// Implementations hold no per-request state, so a single instance can be
/// shared across concurrent callers.
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Sends `message` to the model and returns its trimmed reply.
    async fn generate_advice(&self, message: &str) -> Result<Advice, AdviceError>;
}
