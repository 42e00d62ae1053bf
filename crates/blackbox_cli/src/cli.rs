//! Command-line interface for blackbox.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Black Box - replay and score laser deduction puzzles
#[derive(Parser, Debug)]
#[command(name = "blackbox")]
#[command(about = "Replay, trace and check Black Box puzzles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Output rendering.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Board drawing, exit table and status
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay moves against a puzzle and print the result
    Play {
        /// Path to the puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Move script overriding the one in the puzzle file (e.g. "F0 T1,1 R")
        #[arg(short, long)]
        moves: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Fire every range position at the hidden layout
    Trace {
        /// Path to the puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },

    /// Place guesses, reveal and print the verdict
    Check {
        /// Path to the puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Guessed cells, 1-indexed (e.g. "1,1 3,2")
        #[arg(short, long)]
        guess: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}
