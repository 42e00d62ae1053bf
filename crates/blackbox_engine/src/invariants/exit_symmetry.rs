//! Exit symmetry invariant: pass-through lasers are recorded at both ends.

use super::super::typestate::PuzzleGuessing;
use super::super::types::Exit;
use super::Invariant;

/// Invariant: if range index `i` pairs with `j`, then `j` pairs with `i`.
pub struct ExitSymmetryInvariant;

impl Invariant<PuzzleGuessing> for ExitSymmetryInvariant {
    fn holds(game: &PuzzleGuessing) -> bool {
        let exits = game.board().exits();
        exits.iter().enumerate().all(|(i, slot)| match slot.exit() {
            Exit::PairedWith(j) => {
                j != i && exits.get(j).is_some_and(|far| far.exit() == Exit::PairedWith(i))
            }
            _ => true,
        })
    }

    fn description() -> &'static str {
        "Pass-through exits are paired symmetrically"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BallPosition, Move, Puzzle, PuzzleSpec};

    #[test]
    fn test_holds_after_pass_through() {
        let game = PuzzleSpec::new(3, 3, vec![BallPosition::new(2, 2)])
            .start()
            .unwrap();
        let Ok(Puzzle::Guessing(game)) = game.make_move(Move::Fire(0)) else {
            panic!("Expected guessing puzzle");
        };
        assert!(ExitSymmetryInvariant::holds(&game));
    }

    #[test]
    fn test_one_sided_pair_violates() {
        let mut game = PuzzleSpec::new(3, 3, vec![BallPosition::new(2, 2)])
            .start()
            .unwrap();
        game.board.set_exit(0, Exit::PairedWith(5));
        assert!(!ExitSymmetryInvariant::holds(&game));
    }
}
