//! Contract-based validation for Black Box moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, PuzzleInvariants};
use super::typestate::PuzzleGuessing;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the cell named by the move is in the arena.
pub struct CellInArena;

impl CellInArena {
    /// Checks a 1-indexed arena cell.
    pub fn check(x: usize, y: usize, game: &PuzzleGuessing) -> Result<(), MoveError> {
        if game.board().dimensions().in_arena(x, y) {
            Ok(())
        } else {
            Err(MoveError::CellOutOfRange { x, y })
        }
    }
}

/// Precondition: guess toggling is not locked out on the cell.
pub struct CellUnlocked;

impl CellUnlocked {
    /// Checks a 1-indexed arena cell.
    pub fn check(x: usize, y: usize, game: &PuzzleGuessing) -> Result<(), MoveError> {
        match game.board().cell(x, y) {
            Some(cell) if cell.is_locked() => Err(MoveError::CellLocked { x, y }),
            Some(_) => Ok(()),
            None => Err(MoveError::CellOutOfRange { x, y }),
        }
    }
}

/// Precondition: the range position exists and has not been fired.
pub struct RangeUnfired;

impl RangeUnfired {
    /// Checks a range index.
    pub fn check(index: usize, game: &PuzzleGuessing) -> Result<(), MoveError> {
        match game.board().exit(index) {
            None => Err(MoveError::RangeOutOfRange(index)),
            Some(slot) if !slot.exit().is_empty() => Err(MoveError::AlreadyFired(index)),
            Some(_) => Ok(()),
        }
    }
}

/// Precondition: the guess count is within the accepted ball range.
pub struct GuessCountInRange;

impl GuessCountInRange {
    /// Checks the current guess count.
    pub fn check(game: &PuzzleGuessing) -> Result<(), MoveError> {
        let guesses = game.guesses();
        let (min, max) = (game.min_balls(), game.max_balls());
        if (min..=max).contains(&guesses) {
            Ok(())
        } else {
            Err(MoveError::GuessCountOutOfRange { guesses, min, max })
        }
    }
}

/// Composite precondition: dispatches on the move kind.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(game))]
    pub fn check(action: &Move, game: &PuzzleGuessing) -> Result<(), MoveError> {
        let dims = game.board().dimensions();
        match *action {
            Move::ToggleBall { x, y } => {
                CellInArena::check(x, y, game)?;
                CellUnlocked::check(x, y, game)
            }
            Move::ToggleLock { x, y } => CellInArena::check(x, y, game),
            Move::ToggleColumnLock(x) if (1..=dims.width()).contains(&x) => Ok(()),
            Move::ToggleColumnLock(x) => Err(MoveError::ColumnOutOfRange(x)),
            Move::ToggleRowLock(y) if (1..=dims.height()).contains(&y) => Ok(()),
            Move::ToggleRowLock(y) => Err(MoveError::RowOutOfRange(y)),
            Move::Fire(index) => RangeUnfired::check(index, game),
            Move::Reveal => GuessCountInRange::check(game),
            Move::Solve => Ok(()),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for moves made while guessing.
///
/// Postconditions:
/// - Exit table stays symmetric
/// - Guess counter matches the board
/// - Hidden ball count is unchanged
/// - Fired range positions stay fired
pub struct MoveContract;

impl Contract<PuzzleGuessing, Move> for MoveContract {
    fn pre(game: &PuzzleGuessing, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &PuzzleGuessing, after: &PuzzleGuessing) -> Result<(), MoveError> {
        PuzzleInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        let unfired = before
            .board()
            .exits()
            .iter()
            .zip(after.board().exits())
            .position(|(was, now)| !was.exit().is_empty() && now.exit().is_empty());
        if let Some(index) = unfired {
            warn!(index, "Fired range position was cleared");
            return Err(MoveError::InvariantViolation(format!(
                "Postcondition failed: range index {} was cleared",
                index
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BallPosition, Puzzle, PuzzleSpec};

    fn start() -> PuzzleGuessing {
        PuzzleSpec::new(4, 4, vec![BallPosition::new(1, 1)])
            .start()
            .unwrap()
    }

    fn guessing(puzzle: Puzzle) -> PuzzleGuessing {
        match puzzle {
            Puzzle::Guessing(game) => game,
            Puzzle::Revealed(_) => panic!("Expected guessing puzzle"),
        }
    }

    #[test]
    fn test_precondition_cell_in_arena() {
        let game = start();
        assert!(MoveContract::pre(&game, &Move::ToggleBall { x: 4, y: 4 }).is_ok());
        assert_eq!(
            MoveContract::pre(&game, &Move::ToggleBall { x: 0, y: 1 }),
            Err(MoveError::CellOutOfRange { x: 0, y: 1 })
        );
        assert_eq!(
            MoveContract::pre(&game, &Move::ToggleLock { x: 5, y: 1 }),
            Err(MoveError::CellOutOfRange { x: 5, y: 1 })
        );
    }

    #[test]
    fn test_precondition_locked_cell() {
        let game = guessing(start().make_move(Move::ToggleLock { x: 2, y: 2 }).unwrap());
        assert_eq!(
            MoveContract::pre(&game, &Move::ToggleBall { x: 2, y: 2 }),
            Err(MoveError::CellLocked { x: 2, y: 2 })
        );
    }

    #[test]
    fn test_precondition_lines_in_arena() {
        let game = start();
        assert!(MoveContract::pre(&game, &Move::ToggleColumnLock(4)).is_ok());
        assert_eq!(
            MoveContract::pre(&game, &Move::ToggleColumnLock(0)),
            Err(MoveError::ColumnOutOfRange(0))
        );
        assert_eq!(
            MoveContract::pre(&game, &Move::ToggleRowLock(5)),
            Err(MoveError::RowOutOfRange(5))
        );
    }

    #[test]
    fn test_precondition_fire() {
        let game = guessing(start().make_move(Move::Fire(3)).unwrap());
        assert_eq!(
            MoveContract::pre(&game, &Move::Fire(3)),
            Err(MoveError::AlreadyFired(3))
        );
        assert_eq!(
            MoveContract::pre(&game, &Move::Fire(16)),
            Err(MoveError::RangeOutOfRange(16))
        );
    }

    #[test]
    fn test_precondition_reveal_needs_guesses() {
        let game = start();
        assert_eq!(
            MoveContract::pre(&game, &Move::Reveal),
            Err(MoveError::GuessCountOutOfRange { guesses: 0, min: 1, max: 1 })
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let game = start();
        let after = guessing(game.make_move(Move::Fire(0)).unwrap());
        assert!(MoveContract::post(&game, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let game = start();
        let mut after = guessing(game.make_move(Move::ToggleBall { x: 1, y: 1 }).unwrap());
        after.guesses = 3;
        assert!(matches!(
            MoveContract::post(&game, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_detects_cleared_exit() {
        let game = guessing(start().make_move(Move::Fire(0)).unwrap());
        let mut after = game.clone();
        after.board = after.board.with_cleared_range();
        assert!(MoveContract::post(&game, &after).is_err());
    }
}
