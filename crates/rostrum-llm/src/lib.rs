//! # Rostrum LLM
//!
//! Generation adapters for Rostrum debates.
//!
//! ## Backends
//!
//! | Provider | Type | Notes |
//! |----------|------|-------|
//! | Ollama | Local | `ROSTRUM_OLLAMA_URL` |
//! | Mock | Testing | Scripted / empty / failing modes |
//!
//! Every adapter implements [`TextProvider`] and is treated as unreliable:
//! wrap it in [`TimeoutProvider`] for a per-call deadline and let the caller
//! own the retry budget.
//!
//! ## Quick Start
//!
//! ```rust
//! use rostrum_llm::{MockProvider, TextProvider};
//!
//! #[tokio::main]
//! async fn main() {
//!     let provider = MockProvider::constant("Evidence should drive policy.");
//!     let text = provider.ask("Open the debate.").await.unwrap();
//!     assert!(!text.is_empty());
//! }
//! ```

pub mod config;
pub mod mock;
pub mod ollama;
pub mod provider;
pub mod timeout;

pub use config::{ConfigError, GenConfig};
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use provider::{GenError, GenRequest, GenResponse, TextProvider};
pub use timeout::TimeoutProvider;
