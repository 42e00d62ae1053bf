//! First-class move types for Black Box.
//!
//! Moves are symbolic commands, not pointer events. They carry 1-indexed
//! arena coordinates or a range index and are validated against the puzzle
//! before they are applied.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// A command accepted by the puzzle state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Flip the guess marker on arena cell `(x, y)`.
    ToggleBall {
        /// Column, 1-indexed.
        x: usize,
        /// Row, 1-indexed.
        y: usize,
    },
    /// Flip the lock on arena cell `(x, y)`.
    ToggleLock {
        /// Column, 1-indexed.
        x: usize,
        /// Row, 1-indexed.
        y: usize,
    },
    /// Majority-toggle the locks of one column.
    ToggleColumnLock(usize),
    /// Majority-toggle the locks of one row.
    ToggleRowLock(usize),
    /// Fire a laser from a range index.
    Fire(usize),
    /// Check the guess and finish the puzzle.
    Reveal,
    /// Give up and show the hidden layout.
    Solve,
}

impl Move {
    /// Short name of the command, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Move::ToggleBall { .. } => "toggle_ball",
            Move::ToggleLock { .. } => "toggle_lock",
            Move::ToggleColumnLock(_) => "toggle_column_lock",
            Move::ToggleRowLock(_) => "toggle_row_lock",
            Move::Fire(_) => "fire",
            Move::Reveal => "reveal",
            Move::Solve => "solve",
        }
    }

    /// Parses a whitespace-separated move script such as `"F0 T2,3 R"`.
    #[instrument]
    pub fn parse_script(script: &str) -> Result<Vec<Move>, MoveParseError> {
        script.split_whitespace().map(str::parse).collect()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::ToggleBall { x, y } => write!(f, "T{},{}", x, y),
            Move::ToggleLock { x, y } => write!(f, "LB{},{}", x, y),
            Move::ToggleColumnLock(x) => write!(f, "LC{}", x),
            Move::ToggleRowLock(y) => write!(f, "LR{}", y),
            Move::Fire(index) => write!(f, "F{}", index),
            Move::Reveal => write!(f, "R"),
            Move::Solve => write!(f, "S"),
        }
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = || MoveParseError::Malformed(s.to_string());

        if s.is_empty() {
            return Err(MoveParseError::Empty);
        }
        if let Some(rest) = s.strip_prefix("LB") {
            let (x, y) = parse_pair(rest).ok_or_else(malformed)?;
            return Ok(Move::ToggleLock { x, y });
        }
        if let Some(rest) = s.strip_prefix("LC") {
            return parse_number(rest).map(Move::ToggleColumnLock).ok_or_else(malformed);
        }
        if let Some(rest) = s.strip_prefix("LR") {
            return parse_number(rest).map(Move::ToggleRowLock).ok_or_else(malformed);
        }
        if let Some(rest) = s.strip_prefix('T') {
            let (x, y) = parse_pair(rest).ok_or_else(malformed)?;
            return Ok(Move::ToggleBall { x, y });
        }
        if let Some(rest) = s.strip_prefix('F') {
            return parse_number(rest).map(Move::Fire).ok_or_else(malformed);
        }
        match s {
            "R" => Ok(Move::Reveal),
            "S" => Ok(Move::Solve),
            _ => Err(MoveParseError::UnknownCommand(s.to_string())),
        }
    }
}

fn parse_number(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_pair(s: &str) -> Option<(usize, usize)> {
    let (x, y) = s.split_once(',')?;
    Some((parse_number(x)?, parse_number(y)?))
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The puzzle has already been revealed.
    #[display("Puzzle is already revealed")]
    AlreadyRevealed,

    /// The arena has no such cell.
    #[display("Cell ({}, {}) is outside the arena", x, y)]
    CellOutOfRange {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// The arena has no such column.
    #[display("Column {} is outside the arena", _0)]
    ColumnOutOfRange(usize),

    /// The arena has no such row.
    #[display("Row {} is outside the arena", _0)]
    RowOutOfRange(usize),

    /// The range has no such firing position.
    #[display("Range index {} does not exist", _0)]
    RangeOutOfRange(usize),

    /// The cell is locked against guess toggling.
    #[display("Cell ({}, {}) is locked", x, y)]
    CellLocked {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
    },

    /// A laser has already been fired through this range position.
    #[display("Range index {} has already been fired", _0)]
    AlreadyFired(usize),

    /// Reveal needs a guess count between the minimum and maximum ball count.
    #[display("{} guesses placed, need between {} and {}", guesses, min, max)]
    GuessCountOutOfRange {
        /// Guesses currently placed.
        guesses: usize,
        /// Minimum ball count.
        min: usize,
        /// Maximum ball count.
        max: usize,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}

/// Error produced when move text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveParseError {
    /// No text at all.
    #[display("Empty move")]
    Empty,

    /// The leading command letter is not recognised.
    #[display("Unknown move command: {:?}", _0)]
    UnknownCommand(String),

    /// The command is known but its arguments are not.
    #[display("Malformed move: {:?}", _0)]
    Malformed(String),
}

impl std::error::Error for MoveParseError {}
