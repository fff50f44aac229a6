//! oxo - unified CLI.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use oxo::{run_analyze, run_play, run_selfplay, Cli, Command, Settings};
use tracing::{debug, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(settings.log_filter());
    debug!(?settings, "Settings resolved");

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Play { human, scores } => {
            let mut settings = settings;
            if let Some(human) = human {
                settings = settings.with_human(human);
            }
            if scores {
                settings = settings.with_show_scores(true);
            }
            run_play(&settings, &mut input, &mut out)?;
        }
        Command::Analyze { board, side, json } => {
            run_analyze(&board, side, json, &mut out)?;
        }
        Command::Selfplay { opponent, engine } => {
            run_selfplay(opponent.strategy().as_ref(), engine, &mut out)?;
        }
    }

    Ok(())
}

/// Installs the stderr subscriber; `RUST_LOG` wins over the config filter.
#[instrument]
fn init_tracing(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}
