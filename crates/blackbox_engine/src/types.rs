//! Core domain types for the Black Box arena and its firing range.

use serde::{Deserialize, Serialize};

/// Direction a laser is travelling in.
///
/// Declared in clockwise order so that rotating is a step through the enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards column `w + 1`.
    Right,
    /// Towards row `h + 1`.
    Down,
    /// Towards column 0.
    Left,
}

impl Direction {
    /// Grid offset of one step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Rotates 90° clockwise.
    pub fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Rotates 90° counter-clockwise.
    pub fn counter_clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }
}

/// State of one arena cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    ball: bool,
    guessed: bool,
    locked: bool,
}

impl Cell {
    /// Returns true if the hidden ball sits here.
    pub fn has_ball(&self) -> bool {
        self.ball
    }

    /// Returns true if the player has marked this cell.
    pub fn is_guessed(&self) -> bool {
        self.guessed
    }

    /// Returns true if guess toggling is locked out.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_ball(&mut self, ball: bool) {
        self.ball = ball;
    }

    pub(crate) fn set_guessed(&mut self, guessed: bool) {
        self.guessed = guessed;
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }
}

/// Marker left on a range cell once a laser fired from (or exiting at) it completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeMark {
    /// Nothing fired here yet.
    #[default]
    Blank,
    /// The laser fired from here was absorbed.
    Hit,
    /// The laser fired from here came back out where it went in.
    Reflected,
    /// One endpoint of a pass-through laser; both endpoints share the id.
    Ray(u32),
}

/// One addressable position of the `(w + 2) × (h + 2)` grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// One of the four unused corners.
    Corner,
    /// A cell inside the arena.
    Arena(Cell),
    /// A firing position on the range.
    Range(RangeMark),
}

/// Observed result of firing a laser from one range position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exit {
    /// Never fired.
    #[default]
    Empty,
    /// Absorbed by a ball.
    Hit,
    /// Came back out at the firing position.
    Reflected,
    /// Emerged at the given range index (and vice versa).
    PairedWith(usize),
}

impl Exit {
    /// Returns true if nothing has been fired through this slot.
    pub fn is_empty(&self) -> bool {
        matches!(self, Exit::Empty)
    }
}

impl std::fmt::Display for Exit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exit::Empty => write!(f, "-"),
            Exit::Hit => write!(f, "H"),
            Exit::Reflected => write!(f, "R"),
            Exit::PairedWith(other) => write!(f, "{}", other),
        }
    }
}

/// Exit table entry: the exit itself plus presentation-only annotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitSlot {
    exit: Exit,
    omitted: bool,
    wrong: bool,
}

impl ExitSlot {
    /// The observed exit.
    pub fn exit(&self) -> Exit {
        self.exit
    }

    /// Shown after reveal without the player having fired it.
    pub fn is_omitted(&self) -> bool {
        self.omitted
    }

    /// Fired by the player, and the guess would have answered differently.
    pub fn is_wrong(&self) -> bool {
        self.wrong
    }

    pub(crate) fn set_exit(&mut self, exit: Exit) {
        self.exit = exit;
    }

    pub(crate) fn mark_omitted(&mut self) {
        self.omitted = true;
    }

    pub(crate) fn mark_wrong(&mut self) {
        self.wrong = true;
    }
}

/// What the presentation layer may know about an arena cell.
///
/// `ball` is `None` until the puzzle is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellView {
    /// The player has marked this cell.
    pub guessed: bool,
    /// Guess toggling is locked out.
    pub locked: bool,
    /// Whether the cell holds a ball, once revealed.
    pub ball: Option<bool>,
}
