//! Final debate artifact
//!
//! The [`DebateSummary`] is the complete persisted record of one run: enough
//! for an external renderer or report generator to reproduce any diagram or
//! transcript view without re-running the debate. It serializes to JSON and
//! round-trips losslessly.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use rostrum_core::{SideId, Transcript};

/// The judge's decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// One side won
    Winner(SideId),
    /// Explicit tie (only under [`crate::TieBreak::DeclareTie`])
    Tie,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Winner(side) => write!(f, "{side}"),
            Verdict::Tie => write!(f, "Tie"),
        }
    }
}

/// Numeric scores per side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Scores {
    pub side_a: f64,
    pub side_b: f64,
}

impl Scores {
    /// Score for one side
    pub fn get(&self, side: SideId) -> f64 {
        match side {
            SideId::A => self.side_a,
            SideId::B => self.side_b,
        }
    }

    /// Absolute score gap between the sides
    pub fn gap(&self) -> f64 {
        (self.side_a - self.side_b).abs()
    }
}

/// Complete record of one debate run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateSummary {
    /// Unique run identifier
    pub id: Uuid,
    /// The debate subject
    pub topic: String,
    /// Persona name bound to Side A
    pub persona_a: String,
    /// Persona name bound to Side B
    pub persona_b: String,
    /// The judge's decision; `None` only for cancelled runs
    pub verdict: Option<Verdict>,
    /// Natural-language explanation of the outcome (never empty)
    pub rationale: String,
    /// Final scores
    pub scores: Scores,
    /// The full ordered transcript
    pub transcript: Transcript,
    /// Whether the run was cancelled before completing all rounds
    pub cancelled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostrum_core::Turn;

    #[test]
    fn test_summary_round_trip() {
        let mut transcript = Transcript::new();
        transcript.push(Turn::new(1, SideId::A, "Scientist", "Risk demands evidence."));
        transcript.push(Turn::new(2, SideId::B, "Philosopher", "Autonomy demands respect."));

        let summary = DebateSummary {
            id: Uuid::new_v4(),
            topic: "Should AI be regulated like medicine?".to_string(),
            persona_a: "Scientist".to_string(),
            persona_b: "Philosopher".to_string(),
            verdict: Some(Verdict::Winner(SideId::A)),
            rationale: "The Scientist grounded every turn in evidence.".to_string(),
            scores: Scores { side_a: 4.0, side_b: 2.0 },
            transcript,
            cancelled: false,
        };

        let json = serde_json::to_string_pretty(&summary).unwrap();
        let back: DebateSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(back.verdict, summary.verdict);
        assert_eq!(back.rationale, summary.rationale);
        assert_eq!(back.scores, summary.scores);
        assert_eq!(back.transcript.len(), 2);
        assert_eq!(back.transcript.iter().next().unwrap().round, 1);
    }

    #[test]
    fn test_scores_accessors() {
        let scores = Scores { side_a: 6.0, side_b: 2.5 };
        assert_eq!(scores.get(SideId::A), 6.0);
        assert_eq!(scores.get(SideId::B), 2.5);
        assert_eq!(scores.gap(), 3.5);
    }
}
