//! Black Box engine - a type-safe laser deduction puzzle
//!
//! Balls are hidden in a rectangular arena. The player fires lasers in from
//! the surrounding range, watches where they come out, and marks the cells
//! they believe hold balls. At reveal time the guess is judged by whether it
//! answers every laser the way the hidden layout does.
//!
//! # Architecture
//!
//! - **Perimeter**: coordinate mapping between range indices and grid cells
//! - **Rules**: laser tracing, guess checking and scoring
//! - **Typestate**: `PuzzleGuessing` and `PuzzleRevealed`, wrapped by [`Puzzle`]
//! - **Contracts**: preconditions on every move, invariants after it
//!
//! # Example
//!
//! ```
//! use blackbox_engine::{BallPosition, Move, Puzzle, PuzzleSpec};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let spec = PuzzleSpec::new(5, 5, vec![BallPosition::new(2, 2)]);
//! let puzzle: Puzzle = spec.start()?.into();
//!
//! let puzzle = puzzle.replay(&Move::parse_script("F2 T3,3 R")?)?;
//! assert!(puzzle.outcome().is_some_and(|o| o.is_solved()));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod contracts;
mod invariants;
mod perimeter;
mod phases;
mod rules;
mod setup;
mod types;
mod typestate;
mod wrapper;

// Crate-level exports - Moves
pub use action::{Move, MoveError, MoveParseError};

// Crate-level exports - Board and geometry
pub use board::Board;
pub use perimeter::{Dimensions, RangeEntry};
pub use types::{Cell, CellView, Direction, Exit, ExitSlot, RangeMark, Square};

// Crate-level exports - Rules
pub use rules::{check_guesses, fire_all, fire_laser, score};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    CellInArena, CellUnlocked, Contract, GuessCountInRange, LegalMove, MoveContract, RangeUnfired,
};
pub use invariants::{
    BallCountInvariant, ExitSymmetryInvariant, GuessCountInvariant, Invariant, InvariantSet,
    InvariantViolation, PuzzleInvariants,
};

// Crate-level exports - Puzzle lifecycle
pub use phases::{Outcome, Phase, Score, Verdict};
pub use setup::{BallPosition, PuzzleSpec, SetupError};
pub use typestate::{PuzzleGuessing, PuzzleRevealed};
pub use wrapper::Puzzle;
