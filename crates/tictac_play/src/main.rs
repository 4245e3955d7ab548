//! tictac_play - terminal front end for the tictac engine.

#![warn(missing_docs)]

mod cli;
mod config;
mod render;
mod repl;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::PlayConfig;
use std::path::PathBuf;
use tictac_engine::{GameMode, GameSession, HistoryOrder, Player};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Play {
            config,
            seed,
            delay_ms,
            json,
        } => run_play(config, seed, delay_ms, json).await,
        Command::Replay { moves, json } => run_replay(&moves, json),
    }
}

/// Logs go to stderr so stdout stays clean for the game (and JSON).
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Run the interactive game
#[instrument]
async fn run_play(
    config_path: PathBuf,
    seed: Option<u64>,
    delay_ms: Option<u64>,
    json: bool,
) -> Result<()> {
    let config = PlayConfig::load_or_default(&config_path)?.with_overrides(seed, delay_ms);
    info!(?config, "Starting interactive game");
    repl::run(config, json).await
}

/// Play a human-vs-human sequence and print the final position
#[instrument]
fn run_replay(moves: &[usize], json: bool) -> Result<()> {
    let mut session = GameSession::seeded(0);
    session.select_sign(Player::X)?;
    session.select_mode(GameMode::HumanVsHuman)?;
    session.start()?;

    for (n, &index) in moves.iter().enumerate() {
        session
            .play(index)
            .with_context(|| format!("Move #{} at cell {}", n + 1, index))?;
    }

    let view = session.view(HistoryOrder::Ascending);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render::render(&view));
    }
    Ok(())
}
