//! Puzzle descriptions: the hidden layout a game starts from.

use super::board::Board;
use super::perimeter::Dimensions;
use super::typestate::PuzzleGuessing;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, instrument};

/// A ball position in 0-indexed arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BallPosition {
    /// Column, `0..width`.
    pub x: u8,
    /// Row, `0..height`.
    pub y: u8,
}

impl BallPosition {
    /// Creates a ball position.
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Everything needed to start a puzzle: arena size, accepted guess counts
/// and the hidden layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSpec {
    width: u8,
    height: u8,
    #[serde(default)]
    min_balls: Option<usize>,
    #[serde(default)]
    max_balls: Option<usize>,
    balls: Vec<BallPosition>,
}

impl PuzzleSpec {
    /// Creates a description whose accepted guess count is exactly the number of balls.
    pub fn new(width: u8, height: u8, balls: Vec<BallPosition>) -> Self {
        Self {
            width,
            height,
            min_balls: None,
            max_balls: None,
            balls,
        }
    }

    /// Accepts any guess count in `min..=max` at reveal time.
    pub fn with_ball_range(mut self, min: usize, max: usize) -> Self {
        self.min_balls = Some(min);
        self.max_balls = Some(max);
        self
    }

    /// Arena width.
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Arena height.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Hidden ball positions.
    pub fn balls(&self) -> &[BallPosition] {
        &self.balls
    }

    /// Fewest guesses accepted at reveal.
    pub fn min_balls(&self) -> usize {
        self.min_balls.unwrap_or(self.balls.len())
    }

    /// Most guesses accepted at reveal.
    pub fn max_balls(&self) -> usize {
        self.max_balls.unwrap_or(self.balls.len())
    }

    /// Checks the description without building anything.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.width == 0 || self.height == 0 {
            return Err(SetupError::EmptyArena {
                width: self.width,
                height: self.height,
            });
        }
        let (min, max) = (self.min_balls(), self.max_balls());
        if min > max {
            return Err(SetupError::BallRange { min, max });
        }
        if !(min..=max).contains(&self.balls.len()) {
            return Err(SetupError::BallCount {
                count: self.balls.len(),
                min,
                max,
            });
        }

        let mut seen = HashSet::new();
        for ball in &self.balls {
            if ball.x >= self.width || ball.y >= self.height {
                return Err(SetupError::BallOutOfRange { x: ball.x, y: ball.y });
            }
            if !seen.insert(*ball) {
                return Err(SetupError::DuplicateBall { x: ball.x, y: ball.y });
            }
        }
        Ok(())
    }

    /// Builds the board holding the hidden layout.
    #[instrument(skip(self))]
    pub fn build_board(&self) -> Result<Board, SetupError> {
        self.validate()?;
        let mut board = Board::new(Dimensions::new(self.width.into(), self.height.into()));
        for ball in &self.balls {
            let (x, y) = (usize::from(ball.x) + 1, usize::from(ball.y) + 1);
            if let Some(cell) = board.cell_mut(x, y) {
                cell.set_ball(true);
            }
        }
        Ok(board)
    }

    /// Starts the puzzle in the guessing phase.
    #[instrument(skip(self), fields(width = self.width, height = self.height, balls = self.balls.len()))]
    pub fn start(&self) -> Result<PuzzleGuessing, SetupError> {
        let board = self.build_board()?;
        info!("Puzzle started");
        Ok(PuzzleGuessing::new(
            board,
            self.min_balls(),
            self.max_balls(),
        ))
    }
}

/// Error describing why a puzzle description cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// Width or height is zero.
    #[display("Arena {}x{} has no cells", width, height)]
    EmptyArena {
        /// Width.
        width: u8,
        /// Height.
        height: u8,
    },

    /// Minimum ball count exceeds maximum.
    #[display("Min. balls {} must be <= max. balls {}", min, max)]
    BallRange {
        /// Minimum.
        min: usize,
        /// Maximum.
        max: usize,
    },

    /// The layout has a ball count the range does not allow.
    #[display("{} balls placed, expected between {} and {}", count, min, max)]
    BallCount {
        /// Balls in the layout.
        count: usize,
        /// Minimum.
        min: usize,
        /// Maximum.
        max: usize,
    },

    /// A ball lies outside the arena.
    #[display("Ball ({}, {}) is outside the arena", x, y)]
    BallOutOfRange {
        /// Column.
        x: u8,
        /// Row.
        y: u8,
    },

    /// Two balls share a cell.
    #[display("Ball ({}, {}) is placed twice", x, y)]
    DuplicateBall {
        /// Column.
        x: u8,
        /// Row.
        y: u8,
    },
}

impl std::error::Error for SetupError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_board_shifts_to_grid_coordinates() {
        let spec = PuzzleSpec::new(3, 2, vec![BallPosition::new(0, 0), BallPosition::new(2, 1)]);
        let board = spec.build_board().unwrap();
        assert!(board.has_ball(1, 1));
        assert!(board.has_ball(3, 2));
        assert_eq!(board.ball_count(), 2);
    }

    #[test]
    fn test_rejects_bad_descriptions() {
        let off_grid = PuzzleSpec::new(3, 3, vec![BallPosition::new(3, 0)]);
        assert_eq!(off_grid.validate(), Err(SetupError::BallOutOfRange { x: 3, y: 0 }));

        let twice = PuzzleSpec::new(3, 3, vec![BallPosition::new(1, 1), BallPosition::new(1, 1)]);
        assert_eq!(twice.validate(), Err(SetupError::DuplicateBall { x: 1, y: 1 }));

        let empty = PuzzleSpec::new(0, 3, vec![]);
        assert!(matches!(empty.validate(), Err(SetupError::EmptyArena { .. })));

        let range = PuzzleSpec::new(3, 3, vec![BallPosition::new(0, 0)]).with_ball_range(2, 1);
        assert_eq!(range.validate(), Err(SetupError::BallRange { min: 2, max: 1 }));

        let count = PuzzleSpec::new(3, 3, vec![BallPosition::new(0, 0)]).with_ball_range(2, 4);
        assert!(matches!(count.validate(), Err(SetupError::BallCount { count: 1, .. })));
    }

    #[test]
    fn test_ball_range_defaults_to_ball_count() {
        let spec = PuzzleSpec::new(4, 4, vec![BallPosition::new(0, 0), BallPosition::new(1, 1)]);
        assert_eq!((spec.min_balls(), spec.max_balls()), (2, 2));
    }
}
