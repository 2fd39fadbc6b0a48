//! Rostrum CLI - run and inspect agent debates
//!
//! # Usage
//!
//! ```bash
//! # Run a debate with the built-in mock adapter
//! rostrum run --topic "Should AI agents have memory?"
//!
//! # Run against a local Ollama model, saving the summary
//! rostrum run --topic "Is open weights safer?" --provider ollama \
//!     --model llama3 --out summary.json --log events.jsonl
//!
//! # Re-score a saved summary under a different policy
//! rostrum score --input summary.json --per-turn
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

mod commands;

use commands::{run, score};

/// Rostrum - turn-alternating debates between generative agents
#[derive(Parser)]
#[command(
    name = "rostrum",
    version,
    about = "Rostrum CLI - agent debate orchestration",
    long_about = "Rostrum pits two persona-driven agents against each other for a\n\
                  fixed number of rounds, validates and commits every turn, and\n\
                  scores the transcript with a deterministic judge."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a debate end to end
    #[command(name = "run")]
    Run(run::RunArgs),

    /// Re-score a saved debate summary
    #[command(name = "score")]
    Score(score::ScoreArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run(args) => run::run(args).await,
        Commands::Score(args) => score::run(args),
    }
}

/// Setup logging based on verbosity level
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();
}

/// Print an error message with an X
#[allow(dead_code)]
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}
