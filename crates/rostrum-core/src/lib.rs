//! # Rostrum Core
//!
//! Leaf components of the Rostrum debate engine:
//! - [`SideId`] / [`Persona`] — the two fixed participants and their roles
//! - [`Turn`] / [`Transcript`] — the append-only debate record
//! - [`Validator`] — the gate sequence cleaning raw generated utterances
//! - [`MemoryStore`] — partitioned per-side memory digests
//! - [`EventSink`] — write-only structured event log

pub mod events;
pub mod memory;
pub mod side;
pub mod turn;
pub mod validator;

pub use events::{DebateEvent, EventKind, EventSink, JsonlSink, MemorySink, NullSink};
pub use memory::MemoryStore;
pub use side::{Persona, SideId};
pub use turn::{Transcript, Turn};
pub use validator::{
    jaccard_similarity, Outcome, RejectReason, ValidationPolicy, Validator, ValidatorConfig,
};
