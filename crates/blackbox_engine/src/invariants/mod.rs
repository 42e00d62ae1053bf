//! First-class invariants for Black Box.
//!
//! Invariants are logical properties that must hold while a puzzle is being
//! played. They are testable independently and checked after every move in
//! debug builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        collect(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        collect(violations)
    }
}

pub mod ball_count;
pub mod exit_symmetry;
pub mod guess_count;

pub use ball_count::BallCountInvariant;
pub use exit_symmetry::ExitSymmetryInvariant;
pub use guess_count::GuessCountInvariant;

/// All puzzle invariants as a composable set.
pub type PuzzleInvariants = (ExitSymmetryInvariant, GuessCountInvariant, BallCountInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BallPosition, Move, Puzzle, PuzzleSpec};

    fn start() -> Puzzle {
        PuzzleSpec::new(5, 5, vec![BallPosition::new(2, 2), BallPosition::new(0, 4)])
            .start()
            .unwrap()
            .into()
    }

    #[test]
    fn test_invariant_set_holds_for_new_puzzle() {
        let Puzzle::Guessing(game) = start() else {
            panic!("Expected guessing puzzle");
        };
        assert!(PuzzleInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let moves = Move::parse_script("F0 F1 F7 T3,3 LB2,2 F12").unwrap();
        let Ok(Puzzle::Guessing(game)) = start().replay(&moves) else {
            panic!("Expected guessing puzzle");
        };
        assert!(PuzzleInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let Puzzle::Guessing(mut game) = start() else {
            panic!("Expected guessing puzzle");
        };
        game.guesses = 2;
        game.nballs = 7;

        let violations = PuzzleInvariants::check_all(&game).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let Puzzle::Guessing(game) = start() else {
            panic!("Expected guessing puzzle");
        };
        type TwoInvariants = (ExitSymmetryInvariant, GuessCountInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
