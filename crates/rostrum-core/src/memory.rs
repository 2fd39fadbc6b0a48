//! Partitioned debate memory
//!
//! The [`MemoryStore`] owns the transcript and derives a bounded digest per
//! side after every update. The partitioning invariant is deliberate: a side
//! only ever receives its own digest, never the opponent's raw turn history.
//! The digest is the structured Claim/Rebuttal/Question form — the side's own
//! last utterance, the opponent's last utterance truncated to a fixed word
//! budget, and a templated question once both exist. Recomputation is a
//! single pass over the transcript and fully deterministic.

use crate::side::SideId;
use crate::turn::{Transcript, Turn};

/// Words kept from each utterance when building a digest line
const DIGEST_WORD_BUDGET: usize = 25;

/// Owns the transcript and both sides' derived memory summaries
#[derive(Debug, Clone)]
pub struct MemoryStore {
    transcript: Transcript,
    summary_a: String,
    summary_b: String,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        let mut store = Self {
            transcript: Transcript::new(),
            summary_a: String::new(),
            summary_b: String::new(),
        };
        store.summary_a = store.digest_for(SideId::A);
        store.summary_b = store.digest_for(SideId::B);
        store
    }

    /// Append a turn and recompute both sides' summaries
    pub fn update(&mut self, round: u32, side: SideId, persona: &str, text: &str) {
        self.transcript.push(Turn::new(round, side, persona, text));
        tracing::debug!(round, side = %side, "memory updated");
        self.summary_a = self.digest_for(SideId::A);
        self.summary_b = self.digest_for(SideId::B);
    }

    /// The digest exposed to one side
    ///
    /// Never returns the opponent's raw turn list; the only opponent text a
    /// side sees is the truncated Rebuttal line.
    pub fn summary_for(&self, side: SideId) -> &str {
        match side {
            SideId::A => &self.summary_a,
            SideId::B => &self.summary_b,
        }
    }

    /// Read access to the full transcript (for the judge and final artifact)
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn digest_for(&self, side: SideId) -> String {
        let own_last = self.transcript.for_side(side).last().map(|t| t.text.as_str());
        let other_last = self
            .transcript
            .for_side(side.opponent())
            .last()
            .map(|t| t.text.as_str());

        let claim = own_last.map(truncate_words).unwrap_or_default();
        let rebuttal = other_last.map(truncate_words).unwrap_or_default();
        let question = if !claim.is_empty() && !rebuttal.is_empty() {
            "How do you answer the opposing point directly?"
        } else {
            ""
        };

        format!("- Claim: {claim}\n- Rebuttal: {rebuttal}\n- Question: {question}")
    }
}

fn truncate_words(text: &str) -> String {
    text.split_whitespace()
        .take(DIGEST_WORD_BUDGET)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_has_blank_digest() {
        let store = MemoryStore::new();
        let summary = store.summary_for(SideId::A);
        assert!(summary.contains("- Claim: \n"));
        assert!(summary.ends_with("- Question: "));
    }

    #[test]
    fn test_digest_holds_own_claim_and_opponent_rebuttal() {
        let mut store = MemoryStore::new();
        store.update(1, SideId::A, "Scientist", "Evidence first, always.");
        store.update(2, SideId::B, "Philosopher", "Autonomy outranks expedience.");

        let a = store.summary_for(SideId::A);
        assert!(a.contains("Claim: Evidence first, always."));
        assert!(a.contains("Rebuttal: Autonomy outranks expedience."));
        assert!(a.contains("How do you answer"));

        let b = store.summary_for(SideId::B);
        assert!(b.contains("Claim: Autonomy outranks expedience."));
        assert!(b.contains("Rebuttal: Evidence first, always."));
    }

    #[test]
    fn test_partitioning_before_opponent_speaks() {
        let mut store = MemoryStore::new();
        store.update(1, SideId::A, "Scientist", "Only side A has spoken so far.");

        // B's digest may reference A's last line as Rebuttal, but B has no
        // claim and therefore no question prompt
        let b = store.summary_for(SideId::B);
        assert!(b.contains("- Claim: \n"));
        assert!(b.ends_with("- Question: "));
    }

    #[test]
    fn test_digest_truncates_long_utterances() {
        let long: String = (0..40).map(|i| format!("w{i} ")).collect();
        let mut store = MemoryStore::new();
        store.update(1, SideId::A, "Scientist", long.trim());

        let a = store.summary_for(SideId::A);
        assert!(a.contains("w24"));
        assert!(!a.contains("w25"));
    }

    #[test]
    fn test_recompute_is_deterministic() {
        let mut s1 = MemoryStore::new();
        let mut s2 = MemoryStore::new();
        for (round, side, text) in [
            (1, SideId::A, "Risk must be measured."),
            (2, SideId::B, "Freedom must be preserved."),
            (3, SideId::A, "Protocols catch what intuition misses."),
        ] {
            s1.update(round, side, "P", text);
            s2.update(round, side, "P", text);
        }
        assert_eq!(s1.summary_for(SideId::A), s2.summary_for(SideId::A));
        assert_eq!(s1.summary_for(SideId::B), s2.summary_for(SideId::B));
    }
}
