//! Serializable puzzle wrapper for typestate phases.

use super::action::{Move, MoveError};
use super::board::Board;
use super::phases::{Outcome, Phase};
use super::typestate::{PuzzleGuessing, PuzzleRevealed};
use super::types::{CellView, ExitSlot, RangeMark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// A puzzle in either phase.
///
/// This is the snapshot a host keeps: moves are applied with [`Puzzle::apply`],
/// which returns a new snapshot and never alters the old one, so undo is
/// simply keeping earlier snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Puzzle {
    /// Lasers can be fired and guesses placed.
    Guessing(PuzzleGuessing),
    /// Terminal.
    Revealed(PuzzleRevealed),
}

impl From<PuzzleGuessing> for Puzzle {
    fn from(game: PuzzleGuessing) -> Self {
        Puzzle::Guessing(game)
    }
}

impl From<PuzzleRevealed> for Puzzle {
    fn from(game: PuzzleRevealed) -> Self {
        Puzzle::Revealed(game)
    }
}

impl Puzzle {
    /// Applies one move, returning the successor snapshot.
    ///
    /// Every move is rejected once the puzzle is revealed.
    #[instrument(skip(self, action), fields(action = %action, phase = %self.phase()))]
    pub fn apply(&self, action: Move) -> Result<Puzzle, MoveError> {
        match self {
            Puzzle::Guessing(game) => game.make_move(action).inspect_err(|e| {
                debug!(error = %e, "Move rejected");
            }),
            Puzzle::Revealed(_) => {
                debug!("Move rejected after reveal");
                Err(MoveError::AlreadyRevealed)
            }
        }
    }

    /// Applies moves in order, stopping at the first rejected one.
    #[instrument(skip(self, moves), fields(move_count = moves.len()))]
    pub fn replay(&self, moves: &[Move]) -> Result<Puzzle, MoveError> {
        let mut puzzle = self.clone();
        for action in moves {
            puzzle = puzzle.apply(*action).inspect_err(|e| {
                warn!(error = %e, action = %action, "Replay stopped");
            })?;
        }
        Ok(puzzle)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self {
            Puzzle::Guessing(_) => Phase::Guessing,
            Puzzle::Revealed(_) => Phase::Revealed,
        }
    }

    /// Returns true once revealed.
    pub fn is_revealed(&self) -> bool {
        matches!(self, Puzzle::Revealed(_))
    }

    /// Returns the board for either phase.
    pub fn board(&self) -> &Board {
        match self {
            Puzzle::Guessing(game) => game.board(),
            Puzzle::Revealed(game) => game.board(),
        }
    }

    /// Moves accepted so far.
    pub fn history(&self) -> &[Move] {
        match self {
            Puzzle::Guessing(game) => game.history(),
            Puzzle::Revealed(game) => game.history(),
        }
    }

    /// Returns the outcome, if revealed.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Puzzle::Guessing(_) => None,
            Puzzle::Revealed(game) => Some(game.outcome()),
        }
    }

    /// Returns true if a reveal would currently be accepted.
    pub fn can_reveal(&self) -> bool {
        match self {
            Puzzle::Guessing(game) => game.can_reveal(),
            Puzzle::Revealed(_) => false,
        }
    }

    /// Presentation view of arena cell `(x, y)`, 1-indexed.
    pub fn cell_view(&self, x: usize, y: usize) -> Option<CellView> {
        match self {
            Puzzle::Guessing(game) => game.cell_view(x, y),
            Puzzle::Revealed(game) => game.cell_view(x, y),
        }
    }

    /// Exit-table slot for range index `index`.
    pub fn exit(&self, index: usize) -> Option<&ExitSlot> {
        self.board().exit(index)
    }

    /// Range-cell marker for range index `index`.
    pub fn range_mark(&self, index: usize) -> Option<RangeMark> {
        self.board().range_mark(index)
    }

    /// Board as text, balls drawn only once revealed.
    pub fn display(&self) -> String {
        self.board().display(self.is_revealed())
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match self {
            Puzzle::Guessing(game) => format!(
                "Guessing. {} guesses placed (need {}-{}).",
                game.guesses(),
                game.min_balls(),
                game.max_balls()
            ),
            Puzzle::Revealed(game) => format!("Revealed. {}.", game.outcome()),
        }
    }
}
