//! Tic-Tac-Toe CLI - play against a provably optimal opponent
//!
//! This CLI provides a unified interface for:
//! - Playing a match against the minimax engine, a random baseline, or
//!   another human
//! - Analyzing positions and exporting the full optimal policy

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Tic-Tac-Toe with a provably optimal minimax opponent", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a match at the terminal
    Play(tictactoe::cli::commands::play::PlayArgs),

    /// Analyze positions and export the optimal policy
    Analyze(tictactoe::cli::commands::analyze::AnalyzeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => tictactoe::cli::commands::play::execute(args),
        Commands::Analyze(args) => tictactoe::cli::commands::analyze::execute(args),
    }
}
