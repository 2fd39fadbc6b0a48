//! # Rostrum Arena
//!
//! Debate orchestration: two persona-driven speakers argue a topic for a
//! fixed, even number of rounds, and a deterministic judge scores the
//! transcript and declares the outcome.
//!
//! | Module | What it does |
//! |--------|--------------|
//! | [`orchestrator`] | The round-driving state machine |
//! | [`speaker`] | Retry-and-fallback debating agents |
//! | [`judge`] | Persona-weighted scoring and rationale |
//! | [`state`] | Per-run mutable state and cancellation |
//! | [`summary`] | The final serializable debate record |
//!
//! ```no_run
//! use std::sync::Arc;
//! use rostrum_arena::{DebateConfig, Orchestrator};
//! use rostrum_core::NullSink;
//! use rostrum_llm::MockProvider;
//!
//! # async fn demo() -> Result<(), rostrum_arena::DebateError> {
//! let orchestrator = Orchestrator::new(
//!     DebateConfig::default(),
//!     Arc::new(MockProvider::constant("Evidence should drive every policy decision.")),
//!     Arc::new(NullSink),
//! )?;
//! let summary = orchestrator.run("Should AI agents debate in public?").await?;
//! println!("{}", summary.rationale);
//! # Ok(())
//! # }
//! ```

pub mod judge;
pub mod orchestrator;
pub mod speaker;
pub mod state;
pub mod summary;

pub use judge::{HitPolicy, Judge, JudgeConfig, JudgeReport, TieBreak};
pub use orchestrator::{DebateConfig, DebateError, Orchestrator};
pub use speaker::{Speaker, SpeakerConfig};
pub use state::{CancelHandle, DebatePhase, DebateState};
pub use summary::{DebateSummary, Scores, Verdict};
