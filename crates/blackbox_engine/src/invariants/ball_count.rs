//! Ball count invariant: the hidden layout never changes while guessing.

use super::super::typestate::PuzzleGuessing;
use super::Invariant;

/// Invariant: the board holds exactly the number of balls the puzzle started with.
pub struct BallCountInvariant;

impl Invariant<PuzzleGuessing> for BallCountInvariant {
    fn holds(game: &PuzzleGuessing) -> bool {
        game.nballs() == game.board().ball_count()
    }

    fn description() -> &'static str {
        "Hidden ball count is fixed"
    }
}
