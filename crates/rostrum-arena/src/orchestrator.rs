//! The debate state machine
//!
//! Drives exactly N rounds alternating between two speakers, commits each
//! validated turn to memory, and hands the transcript to the judge. The
//! machine decides who speaks; speakers cannot get the turn order wrong by
//! construction.

use std::sync::Arc;

use rostrum_core::{
    DebateEvent, EventKind, EventSink, Outcome, Persona, RejectReason, SideId, Turn, Validator,
    ValidatorConfig,
};
use rostrum_llm::TextProvider;
use thiserror::Error;
use uuid::Uuid;

use crate::judge::{Judge, JudgeConfig};
use crate::speaker::{Speaker, SpeakerConfig};
use crate::state::{CancelHandle, DebatePhase, DebateState};
use crate::summary::DebateSummary;

/// Hard failures from a debate run
///
/// Validation rejection in lenient mode is not an error; only strict-mode
/// deadlocks and configuration mistakes surface here.
#[derive(Debug, Error)]
pub enum DebateError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Round {round}: turn rejected in strict mode ({reason})")]
    TurnRejected { round: u32, reason: RejectReason },
}

/// Parameters for one debate
#[derive(Debug, Clone)]
pub struct DebateConfig {
    /// Total rounds; must be even so both sides speak equally
    pub rounds: u32,
    /// Which side opens the debate
    pub starting_side: SideId,
    /// Persona bound to Side A
    pub persona_a: Persona,
    /// Persona bound to Side B
    pub persona_b: Persona,
    /// Strict mode: a turn failing the commit gate terminates the debate
    pub strict: bool,
    /// Speaker retry/prompt settings
    pub speaker: SpeakerConfig,
    /// Judge scoring settings
    pub judge: JudgeConfig,
}

impl Default for DebateConfig {
    fn default() -> Self {
        Self {
            rounds: 8,
            starting_side: SideId::A,
            persona_a: Persona::scientist(),
            persona_b: Persona::philosopher(),
            strict: false,
            speaker: SpeakerConfig::default(),
            judge: JudgeConfig::default(),
        }
    }
}

impl DebateConfig {
    fn validate(&self) -> Result<(), DebateError> {
        if self.rounds == 0 || self.rounds % 2 != 0 {
            return Err(DebateError::InvalidConfig(format!(
                "round count must be even and positive, got {}",
                self.rounds
            )));
        }
        Ok(())
    }

    /// The side expected to speak in a given round (1-based)
    fn side_for_round(&self, round: u32) -> SideId {
        if round % 2 == 1 {
            self.starting_side
        } else {
            self.starting_side.opponent()
        }
    }

    fn persona_for(&self, side: SideId) -> &Persona {
        match side {
            SideId::A => &self.persona_a,
            SideId::B => &self.persona_b,
        }
    }
}

/// Callback fired after each committed turn, for progressive display
pub type TurnHook = Box<dyn Fn(&Turn) + Send + Sync>;

/// Runs one debate from start to verdict
pub struct Orchestrator {
    config: DebateConfig,
    provider: Arc<dyn TextProvider>,
    sink: Arc<dyn EventSink>,
    cancel: CancelHandle,
    turn_hook: Option<TurnHook>,
}

impl Orchestrator {
    /// Create an orchestrator; fails on an invalid round count
    pub fn new(
        config: DebateConfig,
        provider: Arc<dyn TextProvider>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, DebateError> {
        config.validate()?;
        Ok(Self {
            config,
            provider,
            sink,
            cancel: CancelHandle::new(),
            turn_hook: None,
        })
    }

    /// Handle that requests cancellation at the next round boundary
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Register a per-turn callback for progressive display
    pub fn on_turn(mut self, hook: impl Fn(&Turn) + Send + Sync + 'static) -> Self {
        self.turn_hook = Some(Box::new(hook));
        self
    }

    /// Run the debate to completion (or cancellation)
    pub async fn run(&self, topic: &str) -> Result<DebateSummary, DebateError> {
        if topic.trim().is_empty() {
            return Err(DebateError::InvalidConfig("topic must not be empty".into()));
        }

        let debate_id = Uuid::new_v4();
        let mut state = DebateState::new(self.config.starting_side);
        self.emit(
            debate_id,
            EventKind::DebateStarted,
            serde_json::json!({
                "topic": topic,
                "persona_a": self.config.persona_a.name,
                "persona_b": self.config.persona_b.name,
                "rounds": self.config.rounds,
            }),
        );
        tracing::info!(%debate_id, topic, rounds = self.config.rounds, "debate started");

        let speaker_a = self.speaker(SideId::A, debate_id);
        let speaker_b = self.speaker(SideId::B, debate_id);

        // Second, independent commit gate: catches anything a speaker's own
        // validation (or its fallback path) let through
        let commit_gate = Validator::new(ValidatorConfig::lenient());

        for round in 1..=self.config.rounds {
            if self.cancel.is_cancelled() {
                self.emit(
                    debate_id,
                    EventKind::DebateCancelled,
                    serde_json::json!({"round": round}),
                );
                tracing::info!(%debate_id, round, "debate cancelled at round boundary");
                state.phase = DebatePhase::Done;
                return Ok(self.partial_summary(debate_id, topic, state));
            }

            let side = self.config.side_for_round(round);
            debug_assert_eq!(side, state.next_side, "state machine chose the wrong speaker");
            state.phase = DebatePhase::Speaking(side);

            let persona = self.config.persona_for(side);
            let memory = state.memory.summary_for(side).to_string();
            let speaker = match side {
                SideId::A => &speaker_a,
                SideId::B => &speaker_b,
            };

            let spoken = speaker
                .speak(topic, round, self.config.rounds, &memory, &state.seen_texts)
                .await;

            let committed = match commit_gate.check(&spoken, &state.seen_texts) {
                Outcome::Accepted(text) => text,
                Outcome::Rejected(reason) if self.config.strict => {
                    state.phase = DebatePhase::Failed;
                    state.error = Some(reason.to_string());
                    self.emit(
                        debate_id,
                        EventKind::DebateFailed,
                        serde_json::json!({"round": round, "reason": reason}),
                    );
                    tracing::error!(%debate_id, round, %reason, "strict mode: turn rejected at commit gate");
                    return Err(DebateError::TurnRejected { round, reason });
                }
                Outcome::Rejected(reason) => {
                    // Lenient: the debate must continue, no round is skipped
                    tracing::warn!(%debate_id, round, %reason, "commit gate rejection ignored in lenient mode");
                    spoken
                }
            };

            state.memory.update(round, side, &persona.name, &committed);
            self.emit(
                debate_id,
                EventKind::MemoryUpdated,
                serde_json::json!({"round": round, "side": side}),
            );
            self.emit(
                debate_id,
                EventKind::TurnCommitted,
                serde_json::json!({
                    "round": round,
                    "side": side,
                    "persona": persona.name,
                    "text": committed,
                }),
            );
            if let Some(hook) = &self.turn_hook {
                if let Some(turn) = state.memory.transcript().last() {
                    hook(turn);
                }
            }
            state.advance(committed);
        }

        state.phase = DebatePhase::Judging;
        let judge = Judge::with_config(self.provider.clone(), self.config.judge.clone());
        let report = judge
            .review(
                state.memory.transcript(),
                &self.config.persona_a,
                &self.config.persona_b,
                topic,
            )
            .await;
        self.emit(
            debate_id,
            EventKind::JudgeReviewed,
            serde_json::json!({
                "verdict": report.verdict.to_string(),
                "side_a": report.scores.side_a,
                "side_b": report.scores.side_b,
            }),
        );

        state.phase = DebatePhase::Done;
        let summary = DebateSummary {
            id: debate_id,
            topic: topic.to_string(),
            persona_a: self.config.persona_a.name.clone(),
            persona_b: self.config.persona_b.name.clone(),
            verdict: Some(report.verdict),
            rationale: report.rationale,
            scores: report.scores,
            transcript: state.memory.transcript().clone(),
            cancelled: false,
        };
        self.emit(
            debate_id,
            EventKind::DebateCompleted,
            serde_json::json!({"turns": summary.transcript.len()}),
        );
        tracing::info!(%debate_id, verdict = %report.verdict, "debate completed");
        Ok(summary)
    }

    fn speaker(&self, side: SideId, debate_id: Uuid) -> Speaker {
        Speaker::with_config(
            side,
            self.config.persona_for(side).clone(),
            self.provider.clone(),
            self.sink.clone(),
            debate_id,
            self.config.speaker.clone(),
        )
    }

    fn partial_summary(&self, debate_id: Uuid, topic: &str, state: DebateState) -> DebateSummary {
        DebateSummary {
            id: debate_id,
            topic: topic.to_string(),
            persona_a: self.config.persona_a.name.clone(),
            persona_b: self.config.persona_b.name.clone(),
            verdict: None,
            rationale: "Debate cancelled before completion; no verdict rendered.".to_string(),
            scores: Default::default(),
            transcript: state.memory.transcript().clone(),
            cancelled: true,
        }
    }

    fn emit(&self, debate_id: Uuid, kind: EventKind, data: serde_json::Value) {
        self.sink.record(DebateEvent::new(debate_id, kind, data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostrum_core::NullSink;
    use rostrum_llm::MockProvider;

    #[test]
    fn test_odd_round_count_rejected() {
        let config = DebateConfig {
            rounds: 7,
            ..Default::default()
        };
        let result = Orchestrator::new(
            config,
            Arc::new(MockProvider::empty()),
            Arc::new(NullSink),
        );
        assert!(matches!(result, Err(DebateError::InvalidConfig(_))));
    }

    #[test]
    fn test_side_for_round_parity() {
        let config = DebateConfig::default();
        assert_eq!(config.side_for_round(1), SideId::A);
        assert_eq!(config.side_for_round(2), SideId::B);
        assert_eq!(config.side_for_round(7), SideId::A);
        assert_eq!(config.side_for_round(8), SideId::B);

        let flipped = DebateConfig {
            starting_side: SideId::B,
            ..Default::default()
        };
        assert_eq!(flipped.side_for_round(1), SideId::B);
        assert_eq!(flipped.side_for_round(2), SideId::A);
    }

    #[tokio::test]
    async fn test_empty_topic_rejected() {
        let orchestrator = Orchestrator::new(
            DebateConfig::default(),
            Arc::new(MockProvider::empty()),
            Arc::new(NullSink),
        )
        .unwrap();
        assert!(matches!(
            orchestrator.run("   ").await,
            Err(DebateError::InvalidConfig(_))
        ));
    }
}
