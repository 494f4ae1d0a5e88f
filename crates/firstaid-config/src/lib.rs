//! Process-wide configuration for the inference proxy and its adapters.
//!
//! Configuration is read once at startup into plain values and handed to the
//! components that need it; nothing reads ambient globals afterwards.
//!
//! - [`ProxyConfig`] — Inference endpoint, model identifier, request timeout
//! - [`ServerConfig`] — Proxy settings plus the HTTP bind address
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use firstaid_config::ProxyConfig;
//!
//! let config = ProxyConfig::from_lookup(|key| match key {
//!     "OLLAMA_MODEL" => Some("llama3".to_string()),
//!     _ => None,
//! })
//! .unwrap();
//!
//! assert_eq!(config.model, "llama3");
//! assert_eq!(config.timeout, Duration::from_secs(60));
//! ```

use std::time::Duration;

use tracing::debug;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "tinyllama";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

pub const ENV_ENDPOINT: &str = "OLLAMA_URL";
pub const ENV_MODEL: &str = "OLLAMA_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "OLLAMA_TIMEOUT_SECS";
pub const ENV_BIND_ADDR: &str = "BIND_ADDR";

/// Errors raised while reading configuration values.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Endpoint is not an http(s) URL.
    #[error("Invalid inference endpoint '{0}': expected an http:// or https:// URL")]
    InvalidEndpoint(String),

    /// Model identifier was set but blank.
    #[error("Model identifier cannot be empty")]
    EmptyModel,

    /// Timeout was not a positive whole number of seconds.
    #[error("Invalid timeout '{value}': expected a positive number of seconds")]
    InvalidTimeout { value: String },

    /// Bind address was set but blank.
    #[error("Bind address cannot be empty")]
    EmptyBindAddr,
}

/// Settings for the outbound call to the inference service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Upper bound on the wait for a complete response.
    pub timeout: Duration,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ProxyConfig {
    /// Reads the proxy settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the proxy settings through `lookup`, falling back to defaults
    /// for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let endpoint = lookup(ENV_ENDPOINT).unwrap_or(defaults.endpoint);
        let model = lookup(ENV_MODEL).unwrap_or(defaults.model);
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_timeout(&raw)?,
            None => defaults.timeout,
        };

        let config = Self { endpoint, model, timeout };
        config.validate()?;

        debug!(
            endpoint = %config.endpoint,
            model = %config.model,
            timeout_secs = config.timeout.as_secs(),
            "Loaded proxy config"
        );
        Ok(config)
    }

    /// Checks the invariants the proxy relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidEndpoint(self.endpoint.clone()));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout { value: "0".into() });
        }
        Ok(())
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout { value: raw.to_string() }),
    }
}

/// Settings for the HTTP adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub proxy: ProxyConfig,
}

impl ServerConfig {
    /// Reads the server settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup(ENV_BIND_ADDR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        if bind_addr.trim().is_empty() {
            return Err(ConfigError::EmptyBindAddr);
        }

        Ok(Self {
            bind_addr,
            proxy: ProxyConfig::from_lookup(lookup)?,
        })
    }
}
