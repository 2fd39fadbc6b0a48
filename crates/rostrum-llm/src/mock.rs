//! Mock generation adapter for testing
//!
//! Debate tests need adapters that misbehave on demand: empty output,
//! hard failures, canned argument scripts. No real model required.

use async_trait::async_trait;
use std::time::Instant;

use crate::provider::{GenError, GenRequest, GenResponse, TextProvider};

/// Which failure mode, if any, the mock simulates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MockMode {
    /// Serve canned responses, cycling through them
    Scripted,
    /// Always return an empty string (degenerate output)
    Empty,
    /// Always return an error
    Failing,
}

/// A mock adapter that returns predefined responses
#[derive(Debug)]
pub struct MockProvider {
    name: String,
    responses: Vec<String>,
    index: std::sync::atomic::AtomicUsize,
    mode: MockMode,
    /// Simulated latency per call
    latency: std::time::Duration,
}

impl MockProvider {
    /// Create a mock that cycles through the given responses
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            name: "mock".to_string(),
            responses,
            index: std::sync::atomic::AtomicUsize::new(0),
            mode: MockMode::Scripted,
            latency: std::time::Duration::from_millis(0),
        }
    }

    /// Create a mock that always returns the same response
    pub fn constant(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Create a mock scripted from string slices
    pub fn scripted(responses: &[&str]) -> Self {
        Self::new(responses.iter().map(|s| s.to_string()).collect())
    }

    /// Create a mock that always returns empty output
    pub fn empty() -> Self {
        Self {
            name: "mock-empty".to_string(),
            responses: Vec::new(),
            index: std::sync::atomic::AtomicUsize::new(0),
            mode: MockMode::Empty,
            latency: std::time::Duration::from_millis(0),
        }
    }

    /// Create a mock that always fails
    pub fn failing() -> Self {
        Self {
            name: "mock-failing".to_string(),
            responses: Vec::new(),
            index: std::sync::atomic::AtomicUsize::new(0),
            mode: MockMode::Failing,
            latency: std::time::Duration::from_millis(0),
        }
    }

    /// Add simulated latency per call (for timeout tests)
    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.latency = latency;
        self
    }

    /// How many completions have been requested so far
    pub fn calls(&self) -> usize {
        self.index.load(std::sync::atomic::Ordering::Relaxed)
    }
}

#[async_trait]
impl TextProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn is_available(&self) -> bool {
        self.mode != MockMode::Failing
    }

    async fn complete(&self, request: GenRequest) -> Result<GenResponse, GenError> {
        let start = Instant::now();
        let idx = self
            .index
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let content = match self.mode {
            MockMode::Failing => {
                return Err(GenError::RequestFailed("mock configured to fail".to_string()));
            }
            MockMode::Empty => String::new(),
            MockMode::Scripted => {
                if self.responses.is_empty() {
                    // Unscripted default: echo a usable argument
                    format!("A reasoned reply to: {}.", truncate(&request.prompt, 8))
                } else {
                    self.responses[idx % self.responses.len()].clone()
                }
            }
        };

        Ok(GenResponse {
            content,
            model: self.name.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn truncate(text: &str, words: usize) -> String {
    text.split_whitespace().take(words).collect::<Vec<_>>().join(" ")
}
