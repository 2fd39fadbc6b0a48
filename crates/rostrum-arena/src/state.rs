//! Debate state machine data
//!
//! One debate run owns exactly one [`DebateState`]; it is created at start,
//! mutated once per round by the orchestrator, and discarded or archived into
//! the summary at the end. Nothing in it is shared between concurrent
//! debates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rostrum_core::{MemoryStore, SideId};

/// Where the state machine currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebatePhase {
    /// Created, no round run yet
    Start,
    /// A side is due to speak
    Speaking(SideId),
    /// All rounds complete, judge reviewing
    Judging,
    /// Terminal: summary produced (including cancelled runs)
    Done,
    /// Terminal: strict-mode validation deadlock
    Failed,
}

/// The full mutable state threaded through one debate run
#[derive(Debug)]
pub struct DebateState {
    /// Round about to be played (1-based)
    pub round: u32,
    /// Side expected to speak next
    pub next_side: SideId,
    /// Owns the transcript and both memory digests
    pub memory: MemoryStore,
    /// Every committed utterance, for duplicate detection
    pub seen_texts: Vec<String>,
    /// Current machine phase
    pub phase: DebatePhase,
    /// Recorded reason when the machine fails
    pub error: Option<String>,
}

impl DebateState {
    /// Fresh state with the given side due first
    pub fn new(starting_side: SideId) -> Self {
        Self {
            round: 1,
            next_side: starting_side,
            memory: MemoryStore::new(),
            seen_texts: Vec::new(),
            phase: DebatePhase::Start,
            error: None,
        }
    }

    /// Record a committed turn and flip the expected speaker
    pub fn advance(&mut self, text: String) {
        self.seen_texts.push(text);
        self.round += 1;
        self.next_side = self.next_side.opponent();
        self.phase = DebatePhase::Speaking(self.next_side);
    }
}

/// Cooperative cancellation flag, checked only at round boundaries
///
/// Cloneable handle; any clone can request cancellation. An in-flight
/// generation call is never preempted.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// New, un-cancelled handle
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation at the next round boundary
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_advances_round_and_side() {
        let mut state = DebateState::new(SideId::A);
        assert_eq!(state.round, 1);
        assert_eq!(state.next_side, SideId::A);

        state.advance("First argument committed.".to_string());
        assert_eq!(state.round, 2);
        assert_eq!(state.next_side, SideId::B);
        assert_eq!(state.phase, DebatePhase::Speaking(SideId::B));
        assert_eq!(state.seen_texts.len(), 1);
    }

    #[test]
    fn test_cancel_handle_shared_across_clones() {
        let handle = CancelHandle::new();
        let clone = handle.clone();
        assert!(!handle.is_cancelled());

        clone.cancel();
        assert!(handle.is_cancelled());
    }
}
