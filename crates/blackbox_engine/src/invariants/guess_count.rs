//! Guess count invariant: the running counter tracks the board.

use super::super::typestate::PuzzleGuessing;
use super::Invariant;

/// Invariant: the guess counter equals the number of guessed cells.
pub struct GuessCountInvariant;

impl Invariant<PuzzleGuessing> for GuessCountInvariant {
    fn holds(game: &PuzzleGuessing) -> bool {
        game.guesses() == game.board().guess_count()
    }

    fn description() -> &'static str {
        "Guess counter matches guessed cells"
    }
}
