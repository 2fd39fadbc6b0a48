//! Score command - re-judge a saved debate summary
//!
//! The verdict is pure computation over the transcript, so a saved summary
//! can be re-scored under a different policy without re-running the debate.
//!
//! Usage:
//! ```bash
//! rostrum score --input summary.json
//! rostrum score --input summary.json --per-turn --novelty-bonus 0.5
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use rostrum_arena::{DebateSummary, HitPolicy, Judge, JudgeConfig, TieBreak, Verdict};
use rostrum_core::{Persona, SideId};
use rostrum_llm::MockProvider;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Path to a saved summary JSON file
    #[arg(long, short = 'i', value_name = "FILE")]
    input: PathBuf,

    /// Count each keyword at most once per turn
    #[arg(long)]
    per_turn: bool,

    /// Bonus per distinct utterance
    #[arg(long, default_value_t = 0.0)]
    novelty_bonus: f64,

    /// Report an exact tie instead of defaulting to Side A
    #[arg(long)]
    declare_tie: bool,
}

/// Run the score command
pub fn run(args: ScoreArgs) -> Result<()> {
    let content = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read summary file {}", args.input.display()))?;
    let summary: DebateSummary =
        serde_json::from_str(&content).context("Failed to parse summary JSON")?;

    let config = JudgeConfig {
        hit_policy: if args.per_turn {
            HitPolicy::PerTurn
        } else {
            HitPolicy::PerOccurrence
        },
        novelty_bonus: args.novelty_bonus,
        tie_break: if args.declare_tie {
            TieBreak::DeclareTie
        } else {
            TieBreak::DefaultSide(SideId::A)
        },
    };

    // Rationale generation is not re-run; decide() never touches the adapter
    let judge = Judge::with_config(Arc::new(MockProvider::failing()), config);
    let persona_a = Persona::by_name(&summary.persona_a);
    let persona_b = Persona::by_name(&summary.persona_b);
    let (verdict, scores) = judge.decide(&summary.transcript, &persona_a, &persona_b);

    println!("{}", "Rostrum Re-score".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!("  {} {}", "Topic:".dimmed(), summary.topic);
    println!("  {} {} turn(s)", "Transcript:".dimmed(), summary.transcript.len());
    println!();

    println!(
        "  {} {} {:.1} / {} {:.1}",
        "Scores:".dimmed(),
        summary.persona_a.cyan(),
        scores.side_a,
        summary.persona_b.magenta(),
        scores.side_b
    );
    println!("  {} {}", "Verdict:".dimmed(), describe(&summary, verdict).bold());

    match summary.verdict {
        Some(recorded) if recorded != verdict => {
            println!(
                "  {} recorded verdict was {}",
                "≠".yellow().bold(),
                describe(&summary, recorded)
            );
        }
        Some(_) => {
            println!("  {} matches the recorded verdict", "✓".green().bold());
        }
        None => {
            println!("  {} no recorded verdict (run was cancelled)", "ℹ".blue());
        }
    }

    Ok(())
}

fn describe(summary: &DebateSummary, verdict: Verdict) -> String {
    match verdict {
        Verdict::Winner(SideId::A) => format!("{} wins", summary.persona_a),
        Verdict::Winner(SideId::B) => format!("{} wins", summary.persona_b),
        Verdict::Tie => "Tie".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rostrum_arena::Scores;
    use rostrum_core::{Transcript, Turn};
    use uuid::Uuid;

    fn saved_summary() -> DebateSummary {
        let mut transcript = Transcript::new();
        transcript.push(Turn::new(1, SideId::A, "Scientist", "Risk and safety matter."));
        transcript.push(Turn::new(2, SideId::B, "Philosopher", "So does moral autonomy."));
        DebateSummary {
            id: Uuid::new_v4(),
            topic: "Test topic".to_string(),
            persona_a: "Scientist".to_string(),
            persona_b: "Philosopher".to_string(),
            verdict: Some(Verdict::Winner(SideId::A)),
            rationale: "Recorded rationale.".to_string(),
            scores: Scores { side_a: 4.0, side_b: 4.0 },
            transcript,
            cancelled: false,
        }
    }

    #[test]
    fn test_score_reads_saved_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        std::fs::write(&path, serde_json::to_string(&saved_summary()).unwrap()).unwrap();

        let args = ScoreArgs {
            input: path,
            per_turn: false,
            novelty_bonus: 0.0,
            declare_tie: false,
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn test_score_fails_on_missing_file() {
        let args = ScoreArgs {
            input: PathBuf::from("/nonexistent/summary.json"),
            per_turn: false,
            novelty_bonus: 0.0,
            declare_tie: false,
        };
        assert!(run(args).is_err());
    }
}
