//! Generation adapter trait and common types
//!
//! Generation is treated as an opaque, unreliable external call: it may be
//! slow, fail outright, or return empty or degenerate text. Callers are
//! expected to wrap providers in [`crate::TimeoutProvider`] and handle
//! retries themselves with a bounded attempt budget.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from generation adapters
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("Provider not available")]
    NotAvailable,
}

/// A generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenRequest {
    /// System prompt (persona framing)
    pub system: String,
    /// User message
    pub prompt: String,
    /// Temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
}

impl GenRequest {
    /// Create a simple request with default settings
    pub fn simple(prompt: &str) -> Self {
        Self {
            system: "You are a skilled debater.".to_string(),
            prompt: prompt.to_string(),
            temperature: 0.7,
            max_tokens: 256,
        }
    }

    /// Create a request with a specific system framing
    pub fn with_system(system: &str, prompt: &str) -> Self {
        Self {
            system: system.to_string(),
            prompt: prompt.to_string(),
            temperature: 0.7,
            max_tokens: 256,
        }
    }
}

/// Response from a generation adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenResponse {
    /// The generated text (may be empty; callers must validate)
    pub content: String,
    /// Model used
    pub model: String,
    /// Time taken in milliseconds
    pub latency_ms: u64,
}

/// Trait for generation adapters
#[async_trait]
pub trait TextProvider: Send + Sync + std::fmt::Debug {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Check if the provider is reachable
    async fn is_available(&self) -> bool;

    /// Generate a completion
    async fn complete(&self, request: GenRequest) -> Result<GenResponse, GenError>;

    /// Generate with a simple prompt (convenience method)
    async fn ask(&self, prompt: &str) -> Result<String, GenError> {
        let response = self.complete(GenRequest::simple(prompt)).await?;
        Ok(response.content)
    }
}
