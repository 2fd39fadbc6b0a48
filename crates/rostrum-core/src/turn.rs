//! Committed turns and the append-only transcript

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::side::SideId;

/// One committed, validated utterance by a side in a specific round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Round number (1-based)
    pub round: u32,
    /// Which side spoke
    pub side: SideId,
    /// Persona name the side spoke as
    pub persona: String,
    /// The validated utterance
    pub text: String,
    /// When the turn was committed
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a turn stamped with the current time
    pub fn new(round: u32, side: SideId, persona: &str, text: &str) -> Self {
        Self {
            round,
            side,
            persona: persona.to_string(),
            text: text.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// The full ordered sequence of turns for one debate
///
/// Append-only: turns can be pushed and read, never modified or removed.
/// Insertion order is round order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    /// Number of committed turns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no turns have been committed yet
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all turns in round order
    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.0.iter()
    }

    /// Iterate over one side's turns in round order
    pub fn for_side(&self, side: SideId) -> impl Iterator<Item = &Turn> {
        self.0.iter().filter(move |t| t.side == side)
    }

    /// The most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.0.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_order_and_filtering() {
        let mut t = Transcript::new();
        t.push(Turn::new(1, SideId::A, "Scientist", "Evidence matters."));
        t.push(Turn::new(2, SideId::B, "Philosopher", "Autonomy matters."));
        t.push(Turn::new(3, SideId::A, "Scientist", "Safety matters."));

        assert_eq!(t.len(), 3);
        let rounds: Vec<u32> = t.iter().map(|turn| turn.round).collect();
        assert_eq!(rounds, vec![1, 2, 3]);
        assert_eq!(t.for_side(SideId::A).count(), 2);
        assert_eq!(t.last().unwrap().round, 3);
    }

    #[test]
    fn test_turn_round_trip() {
        let turn = Turn::new(4, SideId::B, "Philosopher", "Dignity is not negotiable.");
        let json = serde_json::to_string(&turn).unwrap();
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back.round, 4);
        assert_eq!(back.side, SideId::B);
        assert_eq!(back.text, turn.text);
    }
}
