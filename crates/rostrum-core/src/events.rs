//! Structured debate events and the append-only log sink
//!
//! Every noteworthy step of a debate (attempted generations, validation
//! outcomes, committed turns, judge review) is emitted as a [`DebateEvent`]
//! to an [`EventSink`]. Events exist for audit and debugging, never for
//! control flow: sinks are fire-and-forget and a failed write must not abort
//! the debate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event types emitted during a debate run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    DebateStarted,
    GenerationAttempt,
    ValidationRejected,
    FallbackUsed,
    TurnCommitted,
    MemoryUpdated,
    DebateCancelled,
    JudgeReviewed,
    DebateCompleted,
    DebateFailed,
}

/// Single structured event with a free-form JSON payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebateEvent {
    /// Which debate run this event belongs to
    pub debate_id: Uuid,
    /// What happened
    pub kind: EventKind,
    /// When it happened
    pub timestamp: DateTime<Utc>,
    /// Event-specific structured payload
    pub data: serde_json::Value,
}

impl DebateEvent {
    /// Create an event stamped with the current time
    pub fn new(debate_id: Uuid, kind: EventKind, data: serde_json::Value) -> Self {
        Self {
            debate_id,
            kind,
            timestamp: Utc::now(),
            data,
        }
    }
}

/// Write-only, append-only event destination
///
/// Implementations must be safe under concurrent append: a sink may be shared
/// across many simultaneously running debates.
pub trait EventSink: Send + Sync {
    /// Record one event; failures are swallowed by the implementation
    fn record(&self, event: DebateEvent);
}

/// Sink that discards everything
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&self, _event: DebateEvent) {}
}

/// In-memory sink for tests and inspection
#[derive(Debug, Default)]
pub struct MemorySink {
    events: std::sync::Mutex<Vec<DebateEvent>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all recorded events, in append order
    pub fn snapshot(&self) -> Vec<DebateEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Count events of one kind
    pub fn count(&self, kind: &EventKind) -> usize {
        self.events
            .lock()
            .map(|e| e.iter().filter(|ev| ev.kind == *kind).count())
            .unwrap_or(0)
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: DebateEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Line-delimited JSON sink appended to a file
///
/// The mutex keeps each line whole when multiple debates share the sink.
#[derive(Debug)]
pub struct JsonlSink {
    file: std::sync::Mutex<std::fs::File>,
}

impl JsonlSink {
    /// Open (or create) the log file in append mode
    pub fn open(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        Ok(Self {
            file: std::sync::Mutex::new(file),
        })
    }
}

impl EventSink for JsonlSink {
    fn record(&self, event: DebateEvent) {
        use std::io::Write;

        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize debate event");
                return;
            }
        };
        if let Ok(mut file) = self.file.lock() {
            if let Err(e) = writeln!(file, "{line}") {
                tracing::warn!(error = %e, "failed to append debate event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_counts_by_kind() {
        let sink = MemorySink::new();
        let id = Uuid::new_v4();
        sink.record(DebateEvent::new(id, EventKind::DebateStarted, serde_json::json!({})));
        sink.record(DebateEvent::new(
            id,
            EventKind::TurnCommitted,
            serde_json::json!({"round": 1}),
        ));
        sink.record(DebateEvent::new(
            id,
            EventKind::TurnCommitted,
            serde_json::json!({"round": 2}),
        ));

        assert_eq!(sink.count(&EventKind::TurnCommitted), 2);
        assert_eq!(sink.snapshot().len(), 3);
    }

    #[test]
    fn test_jsonl_sink_writes_parseable_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let sink = JsonlSink::open(&path).unwrap();

        let id = Uuid::new_v4();
        sink.record(DebateEvent::new(id, EventKind::DebateStarted, serde_json::json!({})));
        sink.record(DebateEvent::new(
            id,
            EventKind::DebateCompleted,
            serde_json::json!({"rounds": 8}),
        ));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let event: DebateEvent = serde_json::from_str(line).unwrap();
            assert_eq!(event.debate_id, id);
        }
    }
}
