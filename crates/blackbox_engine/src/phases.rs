//! Puzzle phases and reveal outcomes.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// The player is firing lasers and placing guesses.
    Guessing,
    /// The layout has been shown. Terminal.
    Revealed,
}

/// Per-cell tally of a revealed guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    /// Guessed cells holding a ball.
    pub right: usize,
    /// Guessed cells without a ball.
    pub wrong: usize,
    /// Balls the player did not guess.
    pub missed: usize,
}

/// Result of checking a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    /// The guess answers every laser the way the hidden layout does.
    pub consistent: bool,
    /// Cell tally, against the adopted layout when consistent.
    pub score: Score,
}

/// How a puzzle reached the revealed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player revealed and the guess was checked.
    Checked(Verdict),
    /// The player gave up; nothing was checked.
    Conceded,
}

impl Outcome {
    /// Returns the verdict if the guess was checked.
    pub fn verdict(&self) -> Option<&Verdict> {
        match self {
            Outcome::Checked(verdict) => Some(verdict),
            Outcome::Conceded => None,
        }
    }

    /// Returns true if the guess was checked and found consistent.
    pub fn is_solved(&self) -> bool {
        self.verdict().is_some_and(|v| v.consistent)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Checked(v) if v.consistent => write!(
                f,
                "Solved: {} right, {} wrong, {} missed",
                v.score.right, v.score.wrong, v.score.missed
            ),
            Outcome::Checked(v) => write!(
                f,
                "Inconsistent: {} right, {} wrong, {} missed",
                v.score.right, v.score.wrong, v.score.missed
            ),
            Outcome::Conceded => write!(f, "Conceded"),
        }
    }
}
