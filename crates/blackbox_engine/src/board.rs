//! The arena, its firing range and the exit table.

use super::perimeter::Dimensions;
use super::types::{Cell, Exit, ExitSlot, RangeMark, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Full grid and exit-table state for one ball layout.
///
/// Positions are grid coordinates: the arena is `1..=w` × `1..=h`, the range
/// is the ring around it. The board is a plain value; cloning it gives an
/// independent copy that can be fired into without touching this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    dimensions: Dimensions,
    squares: Vec<Square>,
    exits: Vec<ExitSlot>,
    /// Id handed to the next pass-through laser.
    next_ray: u32,
}

impl Board {
    /// Creates an empty board: no balls, nothing fired.
    #[instrument]
    pub fn new(dimensions: Dimensions) -> Self {
        let mut squares = Vec::with_capacity(dimensions.grid_len());
        for y in 0..dimensions.height() + 2 {
            for x in 0..dimensions.width() + 2 {
                let square = if dimensions.is_corner(x, y) {
                    Square::Corner
                } else if dimensions.in_arena(x, y) {
                    Square::Arena(Cell::default())
                } else {
                    Square::Range(RangeMark::Blank)
                };
                squares.push(square);
            }
        }

        Self {
            dimensions,
            squares,
            exits: vec![ExitSlot::default(); dimensions.range_len()],
            next_ray: 1,
        }
    }

    /// Arena dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The square at grid position `(x, y)`.
    pub fn square(&self, x: usize, y: usize) -> Option<&Square> {
        self.dimensions
            .grid_index(x, y)
            .and_then(|i| self.squares.get(i))
    }

    /// The arena cell at grid position `(x, y)`.
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        match self.square(x, y) {
            Some(Square::Arena(cell)) => Some(cell),
            _ => None,
        }
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        let i = self.dimensions.grid_index(x, y)?;
        match self.squares.get_mut(i) {
            Some(Square::Arena(cell)) => Some(cell),
            _ => None,
        }
    }

    /// Returns true if a ball sits at `(x, y)`. Anything outside the arena is empty.
    pub fn has_ball(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_some_and(Cell::has_ball)
    }

    /// Iterates over arena cells as `(x, y, cell)`, row by row.
    pub fn arena(&self) -> impl Iterator<Item = (usize, usize, &Cell)> + '_ {
        let dims = self.dimensions;
        (1..=dims.height()).flat_map(move |y| {
            (1..=dims.width()).filter_map(move |x| self.cell(x, y).map(|cell| (x, y, cell)))
        })
    }

    /// Number of cells holding a ball.
    pub fn ball_count(&self) -> usize {
        self.arena().filter(|(_, _, c)| c.has_ball()).count()
    }

    /// Number of cells the player has marked.
    pub fn guess_count(&self) -> usize {
        self.arena().filter(|(_, _, c)| c.is_guessed()).count()
    }

    /// Number of locked cells in arena column `x`.
    pub fn locked_in_column(&self, x: usize) -> usize {
        (1..=self.dimensions.height())
            .filter(|&y| self.cell(x, y).is_some_and(Cell::is_locked))
            .count()
    }

    /// Number of locked cells in arena row `y`.
    pub fn locked_in_row(&self, y: usize) -> usize {
        (1..=self.dimensions.width())
            .filter(|&x| self.cell(x, y).is_some_and(Cell::is_locked))
            .count()
    }

    /// The exit-table slot for range index `index`.
    pub fn exit(&self, index: usize) -> Option<&ExitSlot> {
        self.exits.get(index)
    }

    /// The whole exit table, indexed by range index.
    pub fn exits(&self) -> &[ExitSlot] {
        &self.exits
    }

    pub(crate) fn exit_mut(&mut self, index: usize) -> Option<&mut ExitSlot> {
        self.exits.get_mut(index)
    }

    pub(crate) fn set_exit(&mut self, index: usize, exit: Exit) {
        if let Some(slot) = self.exits.get_mut(index) {
            slot.set_exit(exit);
        }
    }

    /// The marker on the range cell for range index `index`.
    pub fn range_mark(&self, index: usize) -> Option<RangeMark> {
        let entry = self.dimensions.range_to_grid(index)?;
        match self.square(entry.x, entry.y) {
            Some(Square::Range(mark)) => Some(*mark),
            _ => None,
        }
    }

    pub(crate) fn set_range_mark(&mut self, x: usize, y: usize, mark: RangeMark) {
        let Some(i) = self.dimensions.grid_index(x, y) else {
            return;
        };
        if let Some(Square::Range(current)) = self.squares.get_mut(i) {
            *current = mark;
        }
    }

    /// Hands out the next pass-through laser id.
    pub(crate) fn allocate_ray(&mut self) -> u32 {
        let id = self.next_ray;
        self.next_ray += 1;
        id
    }

    /// Id the next pass-through laser will receive.
    pub fn next_ray(&self) -> u32 {
        self.next_ray
    }

    /// Copy of this board with every range marker and exit cleared.
    pub(crate) fn with_cleared_range(&self) -> Self {
        let mut board = self.clone();
        for square in board.squares.iter_mut() {
            if let Square::Range(mark) = square {
                *mark = RangeMark::Blank;
            }
        }
        board.exits.fill(ExitSlot::default());
        board
    }

    /// Copy of this board whose balls are exactly the player's guesses.
    pub(crate) fn with_guesses_as_balls(&self) -> Self {
        let mut board = self.clone();
        for square in board.squares.iter_mut() {
            if let Square::Arena(cell) = square {
                cell.set_ball(cell.is_guessed());
            }
        }
        board
    }

    /// Formats the board as text; balls are only drawn when `reveal` is set.
    ///
    /// Range cells show `H`/`R` or the laser id; arena cells show `o` for a
    /// guess and `#` for a locked empty cell. Revealed arena cells show `*`
    /// for a correct guess, `x` for a wrong one and `O` for a missed ball.
    pub fn display(&self, reveal: bool) -> String {
        let dims = self.dimensions;
        let mut out = String::new();
        for y in 0..dims.height() + 2 {
            for x in 0..dims.width() + 2 {
                let text = match self.square(x, y) {
                    Some(Square::Range(RangeMark::Blank)) => " .".to_string(),
                    Some(Square::Range(RangeMark::Hit)) => " H".to_string(),
                    Some(Square::Range(RangeMark::Reflected)) => " R".to_string(),
                    Some(Square::Range(RangeMark::Ray(id))) => format!("{:>2}", id),
                    Some(Square::Arena(cell)) => {
                        let symbol = match (reveal, cell.has_ball(), cell.is_guessed()) {
                            (true, true, true) => '*',
                            (true, false, true) => 'x',
                            (true, true, false) => 'O',
                            (false, _, true) => 'o',
                            _ if cell.is_locked() => '#',
                            _ => '-',
                        };
                        format!(" {}", symbol)
                    }
                    Some(Square::Corner) | None => "  ".to_string(),
                };
                out.push_str(&text);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_layout() {
        let board = Board::new(Dimensions::new(3, 2));
        assert_eq!(board.square(0, 0), Some(&Square::Corner));
        assert_eq!(board.square(4, 3), Some(&Square::Corner));
        assert_eq!(board.square(1, 0), Some(&Square::Range(RangeMark::Blank)));
        assert!(matches!(board.square(3, 2), Some(Square::Arena(_))));
        assert_eq!(board.square(5, 0), None);
        assert_eq!(board.exits().len(), 10);
        assert_eq!(board.arena().count(), 6);
    }

    #[test]
    fn test_has_ball_outside_arena_is_false() {
        let mut board = Board::new(Dimensions::new(2, 2));
        if let Some(cell) = board.cell_mut(1, 1) {
            cell.set_ball(true);
        }
        assert!(board.has_ball(1, 1));
        assert!(!board.has_ball(0, 1));
        assert!(!board.has_ball(9, 9));
    }

    #[test]
    fn test_cleared_range_keeps_arena() {
        let mut board = Board::new(Dimensions::new(2, 2));
        if let Some(cell) = board.cell_mut(2, 2) {
            cell.set_ball(true);
            cell.set_guessed(true);
        }
        board.set_range_mark(1, 0, RangeMark::Hit);
        board.set_exit(0, Exit::Hit);

        let cleared = board.with_cleared_range();
        assert_eq!(cleared.range_mark(0), Some(RangeMark::Blank));
        assert!(cleared.exit(0).is_some_and(|s| s.exit().is_empty()));
        assert!(cleared.has_ball(2, 2));
        assert_eq!(cleared.guess_count(), 1);
    }

    #[test]
    fn test_display_hides_balls_until_reveal() {
        let mut board = Board::new(Dimensions::new(2, 2));
        if let Some(cell) = board.cell_mut(1, 1) {
            cell.set_ball(true);
        }
        assert!(!board.display(false).contains('O'));
        assert!(board.display(true).contains('O'));
    }
}
