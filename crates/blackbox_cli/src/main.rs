//! Black Box - command-line host
//!
//! Loads a puzzle file, replays symbolic moves against it and prints the
//! board, the exit table and the reveal outcome.

#![warn(missing_docs)]

mod cli;
mod config;
mod report;

use anyhow::{Context, Result};
use blackbox_engine::{fire_all, Move, Puzzle};
use clap::Parser;
use cli::{Cli, Command, OutputFormat};
use config::PuzzleConfig;
use report::Report;
use std::path::Path;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let output = match cli.command {
        Command::Play {
            puzzle,
            moves,
            format,
        } => run_play(&puzzle, moves.as_deref(), format)?,
        Command::Trace { puzzle, format } => run_trace(&puzzle, format)?,
        Command::Check {
            puzzle,
            guess,
            format,
        } => run_check(&puzzle, &guess, format)?,
    };
    print!("{}", output);
    Ok(())
}

fn start(path: &Path) -> Result<(PuzzleConfig, Puzzle)> {
    let config = PuzzleConfig::from_file(path)?;
    let game = config.spec()?.start()?;
    Ok((config, game.into()))
}

/// Replays moves, skipping the ones the puzzle rejects.
#[instrument(skip(moves), fields(path = %path.display()))]
fn run_play(path: &Path, moves: Option<&str>, format: OutputFormat) -> Result<String> {
    let (config, mut puzzle) = start(path)?;
    let moves = match moves {
        Some(script) => Move::parse_script(script).context("Invalid move script")?,
        None => config.script()?,
    };

    let mut rejected = Vec::new();
    for action in moves {
        match puzzle.apply(action) {
            Ok(next) => puzzle = next,
            Err(e) => {
                warn!(%action, error = %e, "Skipping rejected move");
                rejected.push((action, e.to_string()));
            }
        }
    }

    info!(phase = %puzzle.phase(), accepted = puzzle.history().len(), "Replay finished");
    Report::new(&puzzle, rejected).render(format)
}

/// Fires every range position at the hidden layout.
#[instrument(fields(path = %path.display()))]
fn run_trace(path: &Path, format: OutputFormat) -> Result<String> {
    let config = PuzzleConfig::from_file(path)?;
    let mut board = config.spec()?.build_board()?;

    fire_all(&mut board);

    info!(slots = board.exits().len(), "Trace finished");
    Report::for_board(&board).render(format)
}

/// Places the guesses and reveals.
#[instrument(fields(path = %path.display()))]
fn run_check(path: &Path, guess: &str, format: OutputFormat) -> Result<String> {
    let (_, mut puzzle) = start(path)?;

    for cell in guess.split_whitespace() {
        let action: Move = format!("T{}", cell)
            .parse()
            .with_context(|| format!("Invalid guess {:?}", cell))?;
        puzzle = puzzle
            .apply(action)
            .with_context(|| format!("Guess {} rejected", cell))?;
    }
    puzzle = puzzle.apply(Move::Reveal).context("Reveal rejected")?;

    if let Some(outcome) = puzzle.outcome() {
        info!(%outcome, "Guess checked");
    }
    Report::new(&puzzle, Vec::new()).render(format)
}
