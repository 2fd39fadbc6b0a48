//! Timeout wrapper for generation adapters
//!
//! Adapter calls are the only operations in a debate allowed to block for
//! significant wall-clock time, so every call goes through a per-call
//! deadline. The wrapper also keeps simple counters so a host can see how
//! often its provider is misbehaving.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::provider::{GenError, GenRequest, GenResponse, TextProvider};

/// Wraps any provider with a per-call deadline
#[derive(Debug)]
pub struct TimeoutProvider<P: TextProvider> {
    inner: P,
    deadline: Duration,
    total_requests: AtomicU64,
    total_timeouts: AtomicU64,
}

impl<P: TextProvider> TimeoutProvider<P> {
    /// Wrap a provider with the given per-call deadline
    pub fn new(provider: P, deadline: Duration) -> Self {
        Self {
            inner: provider,
            deadline,
            total_requests: AtomicU64::new(0),
            total_timeouts: AtomicU64::new(0),
        }
    }

    /// Wrap with the default 30-second deadline
    pub fn wrap(provider: P) -> Self {
        Self::new(provider, Duration::from_secs(30))
    }

    /// (total requests, timed-out requests)
    pub fn stats(&self) -> (u64, u64) {
        (
            self.total_requests.load(Ordering::Relaxed),
            self.total_timeouts.load(Ordering::Relaxed),
        )
    }
}

#[async_trait]
impl<P: TextProvider + 'static> TextProvider for TimeoutProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn is_available(&self) -> bool {
        self.inner.is_available().await
    }

    async fn complete(&self, request: GenRequest) -> Result<GenResponse, GenError> {
        self.total_requests.fetch_add(1, Ordering::Relaxed);

        match tokio::time::timeout(self.deadline, self.inner.complete(request)).await {
            Ok(result) => result,
            Err(_) => {
                self.total_timeouts.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    provider = %self.inner.name(),
                    deadline_ms = self.deadline.as_millis() as u64,
                    "generation call timed out"
                );
                Err(GenError::Timeout(self.deadline))
            }
        }
    }
}
