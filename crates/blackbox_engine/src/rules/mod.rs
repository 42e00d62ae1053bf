//! Game rules for Black Box.
//!
//! Pure functions over a [`Board`](super::Board): tracing lasers, checking a
//! guess against the hidden layout, and scoring. The state machine decides
//! when they may run.

pub mod check;
pub mod laser;
pub mod score;

pub use check::check_guesses;
pub use laser::{fire_all, fire_laser};
pub use score::score;
