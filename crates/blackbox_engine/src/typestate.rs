//! Phase-specific typestate structs for Black Box.
//!
//! Each phase is its own type with phase-specific fields. A revealed puzzle
//! ALWAYS has an outcome, and only a guessing puzzle accepts moves.
//!
//! Moves never mutate the receiver: each transition works on a duplicate and
//! returns the successor snapshot, so a rejected move leaves the caller's
//! puzzle exactly as it was.

use super::action::{Move, MoveError};
use super::board::Board;
use super::contracts::{Contract, MoveContract};
use super::phases::{Outcome, Score};
use super::rules::{check_guesses, fire_laser};
use super::types::{CellView, ExitSlot};
use super::wrapper::Puzzle;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

// ─────────────────────────────────────────────────────────────
//  Guessing Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle being played: lasers can be fired and guesses placed.
///
/// Invariants enforced by contract:
/// - the hidden layout holds `nballs` balls
/// - `guesses` counts the guessed cells
/// - the exit table is symmetric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleGuessing {
    pub(crate) board: Board,
    pub(crate) min_balls: usize,
    pub(crate) max_balls: usize,
    pub(crate) nballs: usize,
    pub(crate) guesses: usize,
    pub(crate) history: Vec<Move>,
}

impl PuzzleGuessing {
    pub(crate) fn new(board: Board, min_balls: usize, max_balls: usize) -> Self {
        let nballs = board.ball_count();
        Self {
            board,
            min_balls,
            max_balls,
            nballs,
            guesses: 0,
            history: Vec::new(),
        }
    }

    /// Applies a move and returns the successor puzzle.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (LegalMove)
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self, action), fields(kind = action.name(), action = %action))]
    pub fn make_move(&self, action: Move) -> Result<Puzzle, MoveError> {
        MoveContract::pre(self, &action)?;

        let mut game = self.clone();
        match action {
            Move::ToggleBall { x, y } => game.toggle_ball(x, y),
            Move::ToggleLock { x, y } => {
                if let Some(cell) = game.board.cell_mut(x, y) {
                    let locked = cell.is_locked();
                    cell.set_locked(!locked);
                }
            }
            Move::ToggleColumnLock(x) => {
                let height = game.board.dimensions().height();
                let lock = game.board.locked_in_column(x) <= height / 2;
                for y in 1..=height {
                    game.set_locked(x, y, lock);
                }
            }
            Move::ToggleRowLock(y) => {
                let width = game.board.dimensions().width();
                let lock = game.board.locked_in_row(y) <= width / 2;
                for x in 1..=width {
                    game.set_locked(x, y, lock);
                }
            }
            Move::Fire(index) => {
                let exit = fire_laser(&mut game.board, index)?;
                debug!(index, %exit, "Laser fired");
            }
            Move::Reveal => return Ok(game.reveal(action).into()),
            Move::Solve => return Ok(game.concede(action).into()),
        }
        game.history.push(action);

        #[cfg(debug_assertions)]
        MoveContract::post(self, &game)?;

        Ok(game.into())
    }

    fn toggle_ball(&mut self, x: usize, y: usize) {
        if let Some(cell) = self.board.cell_mut(x, y) {
            let guessed = !cell.is_guessed();
            cell.set_guessed(guessed);
            if guessed {
                self.guesses += 1;
            } else {
                self.guesses -= 1;
            }
        }
    }

    fn set_locked(&mut self, x: usize, y: usize, locked: bool) {
        if let Some(cell) = self.board.cell_mut(x, y) {
            cell.set_locked(locked);
        }
    }

    fn reveal(mut self, action: Move) -> PuzzleRevealed {
        let (board, verdict) = check_guesses(&self.board);
        info!(
            consistent = verdict.consistent,
            right = verdict.score.right,
            wrong = verdict.score.wrong,
            missed = verdict.score.missed,
            "Puzzle revealed"
        );
        self.history.push(action);
        PuzzleRevealed {
            board,
            min_balls: self.min_balls,
            max_balls: self.max_balls,
            history: self.history,
            outcome: Outcome::Checked(verdict),
        }
    }

    fn concede(mut self, action: Move) -> PuzzleRevealed {
        info!("Puzzle conceded");
        self.history.push(action);
        PuzzleRevealed {
            board: self.board,
            min_balls: self.min_balls,
            max_balls: self.max_balls,
            history: self.history,
            outcome: Outcome::Conceded,
        }
    }

    /// Returns the board, hidden layout included.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of cells currently guessed.
    pub fn guesses(&self) -> usize {
        self.guesses
    }

    /// Number of hidden balls.
    pub fn nballs(&self) -> usize {
        self.nballs
    }

    /// Fewest guesses accepted at reveal.
    pub fn min_balls(&self) -> usize {
        self.min_balls
    }

    /// Most guesses accepted at reveal.
    pub fn max_balls(&self) -> usize {
        self.max_balls
    }

    /// Returns true if the guess count allows a reveal.
    pub fn can_reveal(&self) -> bool {
        (self.min_balls..=self.max_balls).contains(&self.guesses)
    }

    /// Moves accepted so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// What the player may see of arena cell `(x, y)`; balls stay hidden.
    pub fn cell_view(&self, x: usize, y: usize) -> Option<CellView> {
        self.board.cell(x, y).map(|cell| CellView {
            guessed: cell.is_guessed(),
            locked: cell.is_locked(),
            ball: None,
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  Revealed Phase
// ─────────────────────────────────────────────────────────────

/// Puzzle after reveal. Terminal: accepts no moves.
///
/// The outcome is ALWAYS present (not Option).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleRevealed {
    board: Board,
    min_balls: usize,
    max_balls: usize,
    history: Vec<Move>,
    outcome: Outcome,
}

impl PuzzleRevealed {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the score if the guess was checked.
    pub fn score(&self) -> Option<Score> {
        self.outcome.verdict().map(|v| v.score)
    }

    /// Returns the board, annotated with omitted and wrong lasers.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Fewest guesses that were accepted at reveal.
    pub fn min_balls(&self) -> usize {
        self.min_balls
    }

    /// Most guesses that were accepted at reveal.
    pub fn max_balls(&self) -> usize {
        self.max_balls
    }

    /// Moves accepted, ending with the reveal.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Everything known about arena cell `(x, y)`, ball included.
    pub fn cell_view(&self, x: usize, y: usize) -> Option<CellView> {
        self.board.cell(x, y).map(|cell| CellView {
            guessed: cell.is_guessed(),
            locked: cell.is_locked(),
            ball: Some(cell.has_ball()),
        })
    }

    /// The exit-table slot for range index `index`.
    pub fn exit(&self, index: usize) -> Option<&ExitSlot> {
        self.board.exit(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BallPosition, PuzzleSpec};

    fn start() -> PuzzleGuessing {
        PuzzleSpec::new(4, 4, vec![BallPosition::new(1, 1)])
            .start()
            .unwrap()
    }

    #[test]
    fn test_toggle_ball_counts_guesses() {
        let game = start();
        let Ok(Puzzle::Guessing(game)) = game.make_move(Move::ToggleBall { x: 1, y: 1 }) else {
            panic!("Expected guessing puzzle");
        };
        assert_eq!(game.guesses(), 1);
        let Ok(Puzzle::Guessing(game)) = game.make_move(Move::ToggleBall { x: 1, y: 1 }) else {
            panic!("Expected guessing puzzle");
        };
        assert_eq!(game.guesses(), 0);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_rejected_move_leaves_receiver_untouched() {
        let game = start();
        let before = game.clone();
        assert!(game.make_move(Move::Fire(99)).is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn test_cell_view_hides_balls_until_reveal() {
        let game = start();
        assert_eq!(game.cell_view(2, 2).and_then(|v| v.ball), None);

        let Ok(Puzzle::Revealed(done)) = game.make_move(Move::Solve) else {
            panic!("Expected revealed puzzle");
        };
        assert_eq!(done.cell_view(2, 2).and_then(|v| v.ball), Some(true));
        assert_eq!(done.outcome(), &Outcome::Conceded);
        assert_eq!(done.score(), None);
    }

    #[test]
    fn test_can_reveal_tracks_guess_count() {
        let game = start();
        assert!(!game.can_reveal());
        let Ok(Puzzle::Guessing(game)) = game.make_move(Move::ToggleBall { x: 3, y: 3 }) else {
            panic!("Expected guessing puzzle");
        };
        assert!(game.can_reveal());
    }
}
