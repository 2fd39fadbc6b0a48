//! End-to-end debate runs against mock adapters

use std::sync::Arc;

use rostrum_arena::{
    DebateConfig, DebateError, DebateSummary, Orchestrator, SpeakerConfig, Verdict,
};
use rostrum_core::{EventKind, MemorySink, NullSink, SideId, ValidatorConfig};
use rostrum_llm::MockProvider;

fn fast_config(rounds: u32) -> DebateConfig {
    DebateConfig {
        rounds,
        speaker: SpeakerConfig {
            backoff: std::time::Duration::from_millis(0),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[tokio::test]
async fn test_debate_produces_exactly_n_alternating_turns() {
    let provider = Arc::new(MockProvider::scripted(&[
        "Regulation must follow the evidence wherever it leads.",
        "Autonomy is not a variable to be regulated away.",
        "Safety protocols exist because untested systems fail.",
        "Human dignity cannot be captured in a test suite.",
    ]));
    let orchestrator =
        Orchestrator::new(fast_config(4), provider, Arc::new(NullSink)).unwrap();
    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();

    assert_eq!(summary.transcript.len(), 4);
    let sides: Vec<SideId> = summary.transcript.iter().map(|t| t.side).collect();
    assert_eq!(sides, vec![SideId::A, SideId::B, SideId::A, SideId::B]);
    let rounds: Vec<u32> = summary.transcript.iter().map(|t| t.round).collect();
    assert_eq!(rounds, vec![1, 2, 3, 4]);
    assert!(!summary.cancelled);
    assert!(summary.verdict.is_some());
}

#[tokio::test]
async fn test_debate_completes_on_dead_adapter() {
    // Every generation attempt returns nothing; every turn is a fallback
    let sink = Arc::new(MemorySink::new());
    let orchestrator = Orchestrator::new(
        fast_config(4),
        Arc::new(MockProvider::empty()),
        sink.clone(),
    )
    .unwrap();
    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();

    assert_eq!(summary.transcript.len(), 4);
    assert!(summary.verdict.is_some());
    assert!(!summary.rationale.is_empty());
    assert_eq!(sink.count(&EventKind::FallbackUsed), 4);
    assert_eq!(sink.count(&EventKind::TurnCommitted), 4);

    // Fallbacks are unique, so every turn text differs
    let texts: std::collections::HashSet<String> = summary
        .transcript
        .iter()
        .map(|t| t.text.to_lowercase())
        .collect();
    assert_eq!(texts.len(), 4);
}

#[tokio::test]
async fn test_strict_mode_fails_on_commit_gate_rejection() {
    // Speaker-level validation is loosened so a too-short utterance reaches
    // the orchestrator's own gate, which rejects it
    let config = DebateConfig {
        strict: true,
        speaker: SpeakerConfig {
            backoff: std::time::Duration::from_millis(0),
            validator: ValidatorConfig {
                min_words: 1,
                ..ValidatorConfig::lenient()
            },
            ..Default::default()
        },
        ..fast_config(4)
    };
    let orchestrator = Orchestrator::new(
        config,
        Arc::new(MockProvider::constant("Nope.")),
        Arc::new(NullSink),
    )
    .unwrap();

    let result = orchestrator.run("Should AI be regulated?").await;
    assert!(matches!(
        result,
        Err(DebateError::TurnRejected { round: 1, .. })
    ));
}

#[tokio::test]
async fn test_lenient_mode_survives_commit_gate_rejection() {
    let config = DebateConfig {
        strict: false,
        speaker: SpeakerConfig {
            backoff: std::time::Duration::from_millis(0),
            validator: ValidatorConfig {
                min_words: 1,
                ..ValidatorConfig::lenient()
            },
            ..Default::default()
        },
        ..fast_config(2)
    };
    let orchestrator = Orchestrator::new(
        config,
        Arc::new(MockProvider::scripted(&["Nope.", "Still nope."])),
        Arc::new(NullSink),
    )
    .unwrap();

    // Both turns fail the commit gate, but the debate still finishes
    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();
    assert_eq!(summary.transcript.len(), 2);
    assert!(summary.verdict.is_some());
}

#[tokio::test]
async fn test_cancellation_before_start_yields_empty_partial_summary() {
    let sink = Arc::new(MemorySink::new());
    let orchestrator = Orchestrator::new(
        fast_config(8),
        Arc::new(MockProvider::empty()),
        sink.clone(),
    )
    .unwrap();
    orchestrator.cancel_handle().cancel();

    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();
    assert!(summary.cancelled);
    assert!(summary.verdict.is_none());
    assert!(summary.transcript.is_empty());
    assert_eq!(sink.count(&EventKind::DebateCancelled), 1);
    assert_eq!(sink.count(&EventKind::JudgeReviewed), 0);
}

#[tokio::test]
async fn test_cancellation_mid_debate_keeps_committed_turns() {
    let orchestrator = Orchestrator::new(
        fast_config(8),
        Arc::new(MockProvider::empty()),
        Arc::new(NullSink),
    )
    .unwrap();
    let handle = orchestrator.cancel_handle();
    let orchestrator = orchestrator.on_turn(move |turn| {
        if turn.round == 2 {
            handle.cancel();
        }
    });

    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();
    assert!(summary.cancelled);
    assert!(summary.verdict.is_none());
    assert_eq!(summary.transcript.len(), 2);
}

#[tokio::test]
async fn test_turns_split_evenly_between_sides() {
    let orchestrator = Orchestrator::new(
        fast_config(6),
        Arc::new(MockProvider::empty()),
        Arc::new(NullSink),
    )
    .unwrap();
    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();

    assert_eq!(summary.transcript.for_side(SideId::A).count(), 3);
    assert_eq!(summary.transcript.for_side(SideId::B).count(), 3);
}

#[tokio::test]
async fn test_summary_survives_json_round_trip() {
    let orchestrator = Orchestrator::new(
        fast_config(2),
        Arc::new(MockProvider::scripted(&[
            "Risk and safety dominate any honest analysis.",
            "Freedom and ethics outrank any safety ledger.",
        ])),
        Arc::new(NullSink),
    )
    .unwrap();
    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();

    let json = serde_json::to_string(&summary).unwrap();
    let back: DebateSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(back.id, summary.id);
    assert_eq!(back.verdict, summary.verdict);
    assert_eq!(back.scores, summary.scores);
    assert_eq!(back.transcript.len(), summary.transcript.len());
}

#[tokio::test]
async fn test_keyword_heavy_side_wins_end_to_end() {
    // Side A (Scientist) speaks in its own vocabulary; Side B avoids all of
    // the Philosopher's keywords
    let orchestrator = Orchestrator::new(
        fast_config(2),
        Arc::new(MockProvider::scripted(&[
            "Risk, safety, and evidence must anchor every protocol.",
            "I simply disagree with that entire framing, full stop.",
        ])),
        Arc::new(NullSink),
    )
    .unwrap();
    let summary = orchestrator.run("Should AI be regulated?").await.unwrap();

    assert_eq!(summary.verdict, Some(Verdict::Winner(SideId::A)));
    assert!(summary.scores.side_a > summary.scores.side_b);
    assert!(summary.rationale.contains("Scientist"));
}

#[tokio::test]
async fn test_event_stream_shape() {
    let sink = Arc::new(MemorySink::new());
    let orchestrator = Orchestrator::new(
        fast_config(2),
        Arc::new(MockProvider::scripted(&[
            "Evidence first, opinions a distant second.",
            "Moral agency first, measurements a distant second.",
        ])),
        sink.clone(),
    )
    .unwrap();
    orchestrator.run("Should AI be regulated?").await.unwrap();

    assert_eq!(sink.count(&EventKind::DebateStarted), 1);
    assert_eq!(sink.count(&EventKind::GenerationAttempt), 2);
    assert_eq!(sink.count(&EventKind::TurnCommitted), 2);
    assert_eq!(sink.count(&EventKind::MemoryUpdated), 2);
    assert_eq!(sink.count(&EventKind::JudgeReviewed), 1);
    assert_eq!(sink.count(&EventKind::DebateCompleted), 1);
}
