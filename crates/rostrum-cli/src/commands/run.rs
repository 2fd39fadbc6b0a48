//! Run command - drive one debate from topic to verdict
//!
//! Usage:
//! ```bash
//! rostrum run --topic "Should AI agents have memory?"
//! rostrum run --topic "..." --provider ollama --model llama3 --rounds 6
//! rostrum run --topic "..." --out summary.json --log events.jsonl
//! ```

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use rostrum_arena::{DebateConfig, DebateSummary, Orchestrator, Verdict};
use rostrum_core::{EventSink, JsonlSink, NullSink, Persona, SideId};
use rostrum_llm::{GenConfig, MockProvider, OllamaProvider, TextProvider, TimeoutProvider};

/// Arguments for the run command
#[derive(Args)]
pub struct RunArgs {
    /// The debate topic
    #[arg(long, short = 't')]
    topic: String,

    /// Persona for Side A
    #[arg(long, default_value = "Scientist")]
    persona_a: String,

    /// Persona for Side B
    #[arg(long, default_value = "Philosopher")]
    persona_b: String,

    /// Total rounds (must be even)
    #[arg(long, short = 'r', default_value_t = 8)]
    rounds: u32,

    /// Generation adapter: "mock" or "ollama" (overrides ROSTRUM_PROVIDER)
    #[arg(long)]
    provider: Option<String>,

    /// Model name for real adapters (overrides ROSTRUM_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Fail the debate if any turn is rejected at the commit gate
    #[arg(long)]
    strict: bool,

    /// Write the final summary as JSON to this file
    #[arg(long, short = 'o', value_name = "FILE")]
    out: Option<PathBuf>,

    /// Append structured events as JSON lines to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,
}

/// Run the run command
pub async fn run(args: RunArgs) -> Result<()> {
    let mut gen_config = GenConfig::from_env();
    if let Some(provider) = &args.provider {
        gen_config.provider = provider.clone();
    }
    if let Some(model) = &args.model {
        gen_config.model = model.clone();
    }
    gen_config
        .validate()
        .context("Invalid generation adapter configuration")?;

    let provider = build_provider(&gen_config);
    let sink = build_sink(args.log.as_deref())?;

    let config = DebateConfig {
        rounds: args.rounds,
        persona_a: Persona::by_name(&args.persona_a),
        persona_b: Persona::by_name(&args.persona_b),
        strict: args.strict,
        ..Default::default()
    };

    println!("{}", "Rostrum Debate".bold().cyan());
    println!("{}", "═".repeat(50).cyan());
    println!("  {} {}", "Topic:".dimmed(), args.topic);
    println!(
        "  {} {} vs {}",
        "Sides:".dimmed(),
        args.persona_a.cyan(),
        args.persona_b.magenta()
    );
    println!(
        "  {} {} rounds via {}",
        "Format:".dimmed(),
        args.rounds,
        provider.name().green()
    );
    println!();

    let orchestrator = Orchestrator::new(config, provider, sink)
        .context("Invalid debate configuration")?;

    // Ctrl-C stops the debate at the next round boundary
    let cancel = orchestrator.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n{} Finishing current turn, then stopping...", "⚠".yellow().bold());
            cancel.cancel();
        }
    });

    let orchestrator = orchestrator.on_turn(|turn| {
        let tag = format!("[R{} {}]", turn.round, turn.persona);
        let tag = match turn.side {
            SideId::A => tag.cyan().bold(),
            SideId::B => tag.magenta().bold(),
        };
        println!("{tag} {}", turn.text);
    });

    let summary = orchestrator.run(&args.topic).await?;
    println!();
    print_outcome(&summary);

    if let Some(out) = &args.out {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(out, json)
            .with_context(|| format!("Failed to write summary to {}", out.display()))?;
        println!("  {} {}", "Saved:".dimmed(), out.display());
    }

    Ok(())
}

fn build_provider(config: &GenConfig) -> Arc<dyn TextProvider> {
    match config.provider.to_lowercase().as_str() {
        "ollama" => Arc::new(TimeoutProvider::new(
            OllamaProvider::with_url(&config.ollama_url, &config.model),
            config.timeout(),
        )),
        _ => Arc::new(TimeoutProvider::new(
            MockProvider::new(Vec::new()),
            config.timeout(),
        )),
    }
}

fn build_sink(log: Option<&std::path::Path>) -> Result<Arc<dyn EventSink>> {
    match log {
        Some(path) => {
            let sink = JsonlSink::open(path)
                .with_context(|| format!("Failed to open event log {}", path.display()))?;
            Ok(Arc::new(sink))
        }
        None => Ok(Arc::new(NullSink)),
    }
}

fn print_outcome(summary: &DebateSummary) {
    println!("{}", "Outcome".bold().cyan());
    println!("{}", "═".repeat(50).cyan());

    if summary.cancelled {
        println!(
            "{} Debate cancelled after {} turn(s); no verdict rendered",
            "⚠".yellow().bold(),
            summary.transcript.len()
        );
        return;
    }

    let verdict = match summary.verdict {
        Some(Verdict::Winner(SideId::A)) => format!("{} wins", summary.persona_a).green(),
        Some(Verdict::Winner(SideId::B)) => format!("{} wins", summary.persona_b).green(),
        Some(Verdict::Tie) => "Tie".yellow(),
        None => "No verdict".dimmed(),
    };
    println!("  {} {}", "Verdict:".dimmed(), verdict.bold());
    println!(
        "  {} {} {:.1} / {} {:.1}",
        "Scores:".dimmed(),
        summary.persona_a.cyan(),
        summary.scores.side_a,
        summary.persona_b.magenta(),
        summary.scores.side_b
    );
    println!("  {} {}", "Rationale:".dimmed(), summary.rationale);
}
