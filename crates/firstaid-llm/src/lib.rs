//! Inference proxy for a locally hosted Ollama model.
//!
//! - [`InferenceProxy`] — Validates, templates, sends and classifies one request
//! - [`build_prompt`] — The fixed first-aid instruction template
//! - [`GenerateRequest`] / [`GenerateResponse`] — Ollama `/api/generate` wire types
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use firstaid_config::ProxyConfig;
//! use firstaid_core::AdviceService;
//! use firstaid_llm::InferenceProxy;
//!
//! let proxy = InferenceProxy::new(ProxyConfig::from_env()?)?;
//! let advice = proxy.generate_advice("I burned my hand").await?;
//! println!("{}", advice.assistant_text);
//! ```

mod ollama;
mod prompt;
mod proxy;

pub use firstaid_core::{Advice, AdviceError, AdviceService, FailureKind};
pub use ollama::{GenerateMetrics, GenerateRequest, GenerateResponse};
pub use prompt::{build_prompt, PROMPT_PREAMBLE};
pub use proxy::InferenceProxy;
