//! Command-line interface for tictac_play.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe with time travel, in the terminal
#[derive(Parser, Debug)]
#[command(name = "tictac_play")]
#[command(about = "Play tic-tac-toe against a friend or a random computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively on stdin
    Play {
        /// Path to a TOML config file
        #[arg(short, long, default_value = "tictac.toml")]
        config: PathBuf,

        /// Seed for the computer opponent
        #[arg(long)]
        seed: Option<u64>,

        /// Delay before the computer moves, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Print the session as JSON after every command
        #[arg(long)]
        json: bool,
    },

    /// Play a fixed sequence of cells (human vs human) and print the result
    Replay {
        /// Cell indices 0-8, X first
        #[arg(required = true)]
        moves: Vec<usize>,

        /// Print the final session as JSON
        #[arg(long)]
        json: bool,
    },
}
