//! Scoring, arbitration, and rationale
//!
//! Winner determination is pure computation over the transcript: the same
//! transcript always produces the same scores and the same verdict. Only the
//! rationale touches the generation adapter, and it degrades to a
//! deterministic template when generation fails or returns junk.

use std::sync::Arc;

use rostrum_core::{Persona, SideId, Transcript};
use rostrum_llm::TextProvider;

use crate::summary::{Scores, Verdict};

/// Whether a keyword scores once per turn or once per occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPolicy {
    /// Weight added for every occurrence of the keyword in a turn
    PerOccurrence,
    /// Weight added at most once per turn containing the keyword
    PerTurn,
}

/// How an exact score tie is resolved after the unique-utterance comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// Fall back to a fixed side (the documented default: Side A)
    DefaultSide(SideId),
    /// Report an explicit tie
    DeclareTie,
}

/// Judge configuration
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Keyword hit counting policy
    pub hit_policy: HitPolicy,
    /// Bonus per distinct utterance, rewarding diversity over keyword
    /// stuffing; disabled (0.0) by default so keyword-free sides score 0
    pub novelty_bonus: f64,
    /// Tie resolution after comparing distinct-utterance counts
    pub tie_break: TieBreak,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            hit_policy: HitPolicy::PerOccurrence,
            novelty_bonus: 0.0,
            tie_break: TieBreak::DefaultSide(SideId::A),
        }
    }
}

/// The judge's full output
#[derive(Debug, Clone)]
pub struct JudgeReport {
    pub verdict: Verdict,
    pub rationale: String,
    pub scores: Scores,
}

/// Scores a completed transcript and produces the verdict and rationale
pub struct Judge {
    provider: Arc<dyn TextProvider>,
    config: JudgeConfig,
}

impl Judge {
    /// Create a judge with default scoring policy
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self::with_config(provider, JudgeConfig::default())
    }

    /// Create a judge with a custom scoring policy
    pub fn with_config(provider: Arc<dyn TextProvider>, config: JudgeConfig) -> Self {
        Self { provider, config }
    }

    /// Persona-weighted keyword score for one side
    pub fn score_side(&self, transcript: &Transcript, side: SideId, persona: &Persona) -> f64 {
        let mut score = 0.0;
        for turn in transcript.for_side(side) {
            let text = turn.text.to_lowercase();
            for (keyword, weight) in &persona.keywords {
                let hits = match self.config.hit_policy {
                    HitPolicy::PerOccurrence => text.matches(keyword.as_str()).count(),
                    HitPolicy::PerTurn => usize::from(text.contains(keyword.as_str())),
                };
                score += f64::from(*weight) * hits as f64;
            }
        }
        score + self.config.novelty_bonus * distinct_count(transcript, side) as f64
    }

    /// Pure winner determination: scores, then deterministic tie-break
    pub fn decide(
        &self,
        transcript: &Transcript,
        persona_a: &Persona,
        persona_b: &Persona,
    ) -> (Verdict, Scores) {
        let scores = Scores {
            side_a: self.score_side(transcript, SideId::A, persona_a),
            side_b: self.score_side(transcript, SideId::B, persona_b),
        };

        let verdict = if scores.side_a > scores.side_b {
            Verdict::Winner(SideId::A)
        } else if scores.side_b > scores.side_a {
            Verdict::Winner(SideId::B)
        } else {
            // Exact tie: prefer the side with strictly more distinct
            // utterances, then apply the configured tie-break
            let distinct_a = distinct_count(transcript, SideId::A);
            let distinct_b = distinct_count(transcript, SideId::B);
            if distinct_a > distinct_b {
                Verdict::Winner(SideId::A)
            } else if distinct_b > distinct_a {
                Verdict::Winner(SideId::B)
            } else {
                match self.config.tie_break {
                    TieBreak::DefaultSide(side) => Verdict::Winner(side),
                    TieBreak::DeclareTie => Verdict::Tie,
                }
            }
        };

        (verdict, scores)
    }

    /// Score the transcript, pick the winner, and produce a rationale
    pub async fn review(
        &self,
        transcript: &Transcript,
        persona_a: &Persona,
        persona_b: &Persona,
        topic: &str,
    ) -> JudgeReport {
        let (verdict, scores) = self.decide(transcript, persona_a, persona_b);
        tracing::info!(verdict = %verdict, side_a = scores.side_a, side_b = scores.side_b, "judge decided");

        let rationale = match self
            .generate_rationale(transcript, persona_a, persona_b, topic, verdict)
            .await
        {
            Some(text) => text,
            None => fallback_rationale(verdict, &scores, persona_a, persona_b),
        };

        JudgeReport {
            verdict,
            rationale,
            scores,
        }
    }

    /// Generated explanation; `None` when the adapter fails or the output is
    /// degenerate (empty, or not naming the declared winner)
    async fn generate_rationale(
        &self,
        transcript: &Transcript,
        persona_a: &Persona,
        persona_b: &Persona,
        topic: &str,
        verdict: Verdict,
    ) -> Option<String> {
        let winner_name = match verdict {
            Verdict::Winner(SideId::A) => &persona_a.name,
            Verdict::Winner(SideId::B) => &persona_b.name,
            Verdict::Tie => return None,
        };

        let transcript_text: Vec<String> = transcript
            .iter()
            .map(|t| format!("[{} R{}]: {}", t.persona, t.round, t.text))
            .collect();

        let prompt = format!(
            "Debate topic: {topic}\n\
             Transcript:\n{}\n\
             The declared winner is {winner_name}. In one or two sentences, \
             explain why {winner_name} won by summarizing the argument themes. \
             Do not mention numeric scores. Output only the explanation.",
            transcript_text.join("\n")
        );

        let raw = match self.provider.ask(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "rationale generation failed, using fallback");
                return None;
            }
        };

        let cleaned = first_sentences(raw.trim(), 2);
        if cleaned.is_empty() || !cleaned.to_lowercase().contains(&winner_name.to_lowercase()) {
            tracing::warn!("degenerate rationale from adapter, using fallback");
            return None;
        }
        Some(cleaned)
    }
}

/// Number of distinct (normalized) utterances by one side
fn distinct_count(transcript: &Transcript, side: SideId) -> usize {
    let texts: std::collections::HashSet<String> = transcript
        .for_side(side)
        .map(|t| t.text.trim().to_lowercase())
        .collect();
    texts.len()
}

/// Deterministic rationale referencing the winner and the score-gap magnitude
fn fallback_rationale(
    verdict: Verdict,
    scores: &Scores,
    persona_a: &Persona,
    persona_b: &Persona,
) -> String {
    let magnitude = match scores.gap() {
        gap if gap == 0.0 => "dead-even",
        gap if gap <= 2.0 => "narrow",
        gap if gap <= 5.0 => "clear",
        _ => "decisive",
    };

    match verdict {
        Verdict::Winner(side) => {
            let winner = match side {
                SideId::A => &persona_a.name,
                SideId::B => &persona_b.name,
            };
            format!(
                "{winner} prevails by a {magnitude} margin, having grounded more of the \
                 debate in their side's core themes."
            )
        }
        Verdict::Tie => format!(
            "{} and {} fought to a tie: neither side established more thematic ground \
             than the other.",
            persona_a.name, persona_b.name
        ),
    }
}

/// First `n` sentences of the first paragraph
fn first_sentences(text: &str, n: usize) -> String {
    let paragraph = text.split("\n\n").next().unwrap_or("").trim();
    paragraph
        .split_inclusive(['.', '!', '?'])
        .take(n)
        .collect::<String>()
        .trim()
        .to_string()
}
