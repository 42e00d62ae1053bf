//! Mapping between range indices and grid coordinates.
//!
//! The arena occupies `1..=w` × `1..=h` of a `(w + 2) × (h + 2)` grid. The
//! ring around it is the firing range, numbered clockwise from the cell just
//! right of the top-left corner:
//!
//! - top edge, left to right, firing down;
//! - right edge, top to bottom, firing left;
//! - bottom edge, right to left, firing up;
//! - left edge, bottom to top, firing right.

use super::types::Direction;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Arena dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

/// A firing position: its grid coordinates and the direction pointing into the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeEntry {
    /// Grid column.
    pub x: usize,
    /// Grid row.
    pub y: usize,
    /// Inward direction.
    pub direction: Direction,
}

impl Dimensions {
    /// Creates dimensions for a `width × height` arena.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Arena width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Arena height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of firing positions, `2 (w + h)`.
    pub fn range_len(&self) -> usize {
        2 * (self.width + self.height)
    }

    /// Number of addressable grid positions including the range and corners.
    pub fn grid_len(&self) -> usize {
        (self.width + 2) * (self.height + 2)
    }

    /// Flat index of grid position `(x, y)`, if it is on the grid at all.
    pub fn grid_index(&self, x: usize, y: usize) -> Option<usize> {
        if x > self.width + 1 || y > self.height + 1 {
            return None;
        }
        Some(y * (self.width + 2) + x)
    }

    /// Returns true for arena cells.
    pub fn in_arena(&self, x: usize, y: usize) -> bool {
        (1..=self.width).contains(&x) && (1..=self.height).contains(&y)
    }

    /// Returns true for the four unused corners.
    pub fn is_corner(&self, x: usize, y: usize) -> bool {
        (x == 0 || x == self.width + 1) && (y == 0 || y == self.height + 1)
    }

    /// One step from `(x, y)` in `direction`, if that stays on the grid.
    pub fn step(&self, x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.offset();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        self.grid_index(nx, ny).map(|_| (nx, ny))
    }

    /// Resolves a range index to its grid position and inward direction.
    #[instrument(level = "trace", skip(self))]
    pub fn range_to_grid(&self, index: usize) -> Option<RangeEntry> {
        let (w, h) = (self.width, self.height);
        let mut i = index;

        if i < w {
            return Some(RangeEntry {
                x: i + 1,
                y: 0,
                direction: Direction::Down,
            });
        }
        i -= w;
        if i < h {
            return Some(RangeEntry {
                x: w + 1,
                y: i + 1,
                direction: Direction::Left,
            });
        }
        i -= h;
        if i < w {
            return Some(RangeEntry {
                x: w - i,
                y: h + 1,
                direction: Direction::Up,
            });
        }
        i -= w;
        if i < h {
            return Some(RangeEntry {
                x: 0,
                y: h - i,
                direction: Direction::Right,
            });
        }
        None
    }

    /// Resolves a grid position on the range to its range index.
    ///
    /// Arena cells, corners and positions off the grid have no index.
    #[instrument(level = "trace", skip(self))]
    pub fn grid_to_range(&self, x: usize, y: usize) -> Option<usize> {
        let (w, h) = (self.width, self.height);
        let (x1, y1) = (w + 1, h + 1);

        if self.in_arena(x, y) || x > x1 || y > y1 || self.is_corner(x, y) {
            return None;
        }

        let index = if y == 0 {
            x - 1
        } else if x == x1 {
            w + y - 1
        } else if y == y1 {
            w + h + (w - x)
        } else {
            2 * w + h + (h - y)
        };
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_index_of_each_edge() {
        let dims = Dimensions::new(5, 3);
        let at = |i| dims.range_to_grid(i).map(|e| (e.x, e.y, e.direction));

        assert_eq!(at(0), Some((1, 0, Direction::Down)));
        assert_eq!(at(5), Some((6, 1, Direction::Left)));
        assert_eq!(at(8), Some((5, 4, Direction::Up)));
        assert_eq!(at(13), Some((0, 3, Direction::Right)));
        assert_eq!(at(15), Some((0, 1, Direction::Right)));
        assert_eq!(at(16), None);
    }

    #[test]
    fn test_rejects_non_range_positions() {
        let dims = Dimensions::new(4, 4);
        assert_eq!(dims.grid_to_range(2, 2), None);
        assert_eq!(dims.grid_to_range(0, 0), None);
        assert_eq!(dims.grid_to_range(5, 5), None);
        assert_eq!(dims.grid_to_range(0, 5), None);
        assert_eq!(dims.grid_to_range(6, 1), None);
        assert_eq!(dims.grid_to_range(1, 6), None);
    }

    #[test]
    fn test_step_stays_on_grid() {
        let dims = Dimensions::new(2, 2);
        assert_eq!(dims.step(0, 1, Direction::Left), None);
        assert_eq!(dims.step(1, 0, Direction::Up), None);
        assert_eq!(dims.step(3, 2, Direction::Right), None);
        assert_eq!(dims.step(1, 1, Direction::Down), Some((1, 2)));
    }
}
