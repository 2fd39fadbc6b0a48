//! Adapter configuration
//!
//! Providers are explicit instances injected at construction time; the host
//! application builds them once from this configuration and reuses them for
//! the lifetime of the process. No ambient global state.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Error types for configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generation adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConfig {
    /// Ollama base URL (env: ROSTRUM_OLLAMA_URL)
    pub ollama_url: String,
    /// Provider to use: "mock" or "ollama" (env: ROSTRUM_PROVIDER)
    pub provider: String,
    /// Model name for real providers (env: ROSTRUM_MODEL)
    pub model: String,
    /// Per-call deadline in seconds (env: ROSTRUM_GEN_TIMEOUT_SECS)
    pub timeout_secs: u64,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            ollama_url: "http://localhost:11434".to_string(),
            provider: "mock".to_string(),
            model: "llama3".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GenConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ollama_url: env::var("ROSTRUM_OLLAMA_URL").unwrap_or(defaults.ollama_url),
            provider: env::var("ROSTRUM_PROVIDER").unwrap_or(defaults.provider),
            model: env::var("ROSTRUM_MODEL").unwrap_or(defaults.model),
            timeout_secs: env::var("ROSTRUM_GEN_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Per-call deadline as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check that the configured provider name is one we know
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.provider.to_lowercase().as_str() {
            "mock" | "ollama" => Ok(()),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}
