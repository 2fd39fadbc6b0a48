//! Debating agents
//!
//! A [`Speaker`] turns a persona, topic, and memory digest into one usable
//! utterance per round. `speak` never fails: adapter errors count as empty
//! output, invalid output is retried with a perturbed prompt under a fixed
//! attempt budget, and exhaustion degrades to a deterministic templated
//! fallback that always satisfies the validator's length and punctuation
//! gates.

use std::sync::Arc;
use std::time::Duration;

use rostrum_core::{
    DebateEvent, EventKind, EventSink, Outcome, Persona, SideId, Validator, ValidatorConfig,
};
use rostrum_llm::{GenRequest, TextProvider};
use uuid::Uuid;

/// Retry and prompt-shaping knobs for a speaker
#[derive(Debug, Clone)]
pub struct SpeakerConfig {
    /// Total generation attempts before falling back (including the first)
    pub attempts: u32,
    /// Sleep between attempts, to avoid hammering the adapter
    pub backoff: Duration,
    /// Validation applied to each attempt (lenient by default)
    pub validator: ValidatorConfig,
    /// How many recent utterances to remind the model not to repeat
    pub reminder_texts: usize,
}

impl Default for SpeakerConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            backoff: Duration::from_millis(250),
            validator: ValidatorConfig::lenient(),
            reminder_texts: 3,
        }
    }
}

/// One side's debating agent
pub struct Speaker {
    side: SideId,
    persona: Persona,
    provider: Arc<dyn TextProvider>,
    sink: Arc<dyn EventSink>,
    debate_id: Uuid,
    config: SpeakerConfig,
}

impl Speaker {
    /// Create a speaker with default retry settings
    pub fn new(
        side: SideId,
        persona: Persona,
        provider: Arc<dyn TextProvider>,
        sink: Arc<dyn EventSink>,
        debate_id: Uuid,
    ) -> Self {
        Self::with_config(side, persona, provider, sink, debate_id, SpeakerConfig::default())
    }

    /// Create a speaker with custom retry settings
    pub fn with_config(
        side: SideId,
        persona: Persona,
        provider: Arc<dyn TextProvider>,
        sink: Arc<dyn EventSink>,
        debate_id: Uuid,
        config: SpeakerConfig,
    ) -> Self {
        Self {
            side,
            persona,
            provider,
            sink,
            debate_id,
            config,
        }
    }

    /// The persona this speaker argues as
    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    /// Produce one usable utterance for the given round
    ///
    /// Infallible by contract: if every generation attempt is rejected the
    /// deterministic fallback is returned instead.
    pub async fn speak(
        &self,
        topic: &str,
        round: u32,
        total_rounds: u32,
        memory_summary: &str,
        seen_texts: &[String],
    ) -> String {
        let validator = Validator::new(self.config.validator.clone());

        for attempt in 0..self.config.attempts {
            if attempt > 0 {
                tokio::time::sleep(self.config.backoff).await;
            }

            let request = self.build_prompt(topic, round, total_rounds, memory_summary, seen_texts, attempt > 0);
            let raw = match self.provider.complete(request).await {
                Ok(response) => response.content,
                Err(e) => {
                    tracing::debug!(side = %self.side, round, attempt, error = %e, "generation failed");
                    String::new()
                }
            };

            self.emit(
                EventKind::GenerationAttempt,
                serde_json::json!({
                    "side": self.side,
                    "round": round,
                    "attempt": attempt + 1,
                    "raw": raw,
                }),
            );

            match validator.check(&raw, seen_texts) {
                Outcome::Accepted(text) => {
                    tracing::debug!(side = %self.side, round, attempt, "utterance accepted");
                    return text;
                }
                Outcome::Rejected(reason) => {
                    self.emit(
                        EventKind::ValidationRejected,
                        serde_json::json!({
                            "side": self.side,
                            "round": round,
                            "attempt": attempt + 1,
                            "reason": reason,
                        }),
                    );
                }
            }
        }

        let fallback = self.fallback_text(topic, round, seen_texts);
        self.emit(
            EventKind::FallbackUsed,
            serde_json::json!({
                "side": self.side,
                "round": round,
                "text": fallback,
            }),
        );
        tracing::info!(side = %self.side, round, "retry budget exhausted, using fallback");
        fallback
    }

    fn build_prompt(
        &self,
        topic: &str,
        round: u32,
        total_rounds: u32,
        memory_summary: &str,
        seen_texts: &[String],
        perturbed: bool,
    ) -> GenRequest {
        let phase = phase_hint(round, total_rounds);

        let mut prompt = format!(
            "Debate topic: {topic}\n\
             You are {name}, speaking in round {round} of {total_rounds} ({phase}).\n\
             Your memory of the debate so far:\n{memory_summary}\n",
            name = self.persona.name,
        );

        let recent: Vec<&String> = seen_texts
            .iter()
            .rev()
            .take(self.config.reminder_texts)
            .collect();
        if !recent.is_empty() {
            prompt.push_str("Points already made (do not repeat any of them):\n");
            for text in recent.iter().rev() {
                prompt.push_str(&format!("- {text}\n"));
            }
        }

        prompt.push_str(&format!(
            "Reply with one concise paragraph of at most {} words, ending with terminal punctuation.",
            self.config.validator.max_words
        ));
        if perturbed {
            prompt.push_str("\nGive a different argument from anything above.");
        }

        GenRequest::with_system(&self.persona.framing, &prompt)
    }

    /// Deterministic templated utterance, unique within this debate
    fn fallback_text(&self, topic: &str, round: u32, seen_texts: &[String]) -> String {
        let mut candidate = format!(
            "As {}, I maintain in round {} that {} demands continued scrutiny from my side.",
            self.persona.name, round, topic
        );

        let mut counter = 1u32;
        while seen_texts
            .iter()
            .any(|s| s.trim().to_lowercase() == candidate.trim().to_lowercase())
        {
            counter += 1;
            candidate = format!(
                "As {}, I restate position {} for round {}: {} still demands scrutiny.",
                self.persona.name, counter, round, topic
            );
        }
        candidate
    }

    fn emit(&self, kind: EventKind, data: serde_json::Value) {
        self.sink.record(DebateEvent::new(self.debate_id, kind, data));
    }
}

/// Short phase hint by round position
fn phase_hint(round: u32, total_rounds: u32) -> &'static str {
    if round <= 2 {
        "opening"
    } else if round > total_rounds.saturating_sub(2) {
        "closing"
    } else {
        "building"
    }
}
