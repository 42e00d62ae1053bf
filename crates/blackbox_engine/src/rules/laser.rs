//! Laser tracing.
//!
//! A laser travels in a straight line until it sees a ball. A ball directly
//! ahead absorbs it. A ball diagonally ahead deflects it 90° away from the
//! ball; the turn happens in place, then the laser looks again. Absorption is
//! checked before deflection and front-left before front-right.
//!
//! At the firing position the same probes decide an instant hit or an
//! instant reflection before the laser ever enters the arena.

use super::super::action::MoveError;
use super::super::board::Board;
use super::super::types::{Direction, Exit, RangeMark};
use tracing::{debug, instrument, trace};

/// Where to look relative to the laser's heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Look {
    Left,
    Forward,
    Right,
}

/// Returns true if a ball sits one step ahead of `(x, y)` (shifted to the
/// left or right for diagonal probes). Probes off the arena see nothing.
fn sees_ball(board: &Board, x: usize, y: usize, direction: Direction, look: Look) -> bool {
    let dims = board.dimensions();
    let Some((fx, fy)) = dims.step(x, y, direction) else {
        return false;
    };
    let probe = match look {
        Look::Forward => Some((fx, fy)),
        Look::Left => dims.step(fx, fy, direction.counter_clockwise()),
        Look::Right => dims.step(fx, fy, direction.clockwise()),
    };
    probe.is_some_and(|(px, py)| board.has_ball(px, py))
}

/// Fires a laser from range index `index` and records the result.
///
/// Writes the exit table (one slot, or both ends of a pass-through pair) and
/// the range markers, and returns the exit observed at `index`.
///
/// # Panics
///
/// Panics if the laser walks onto a ball or fails to leave the arena; both
/// mean the board is corrupt.
#[instrument(skip(board))]
pub fn fire_laser(board: &mut Board, index: usize) -> Result<Exit, MoveError> {
    let dims = board.dimensions();
    let entry = dims
        .range_to_grid(index)
        .ok_or(MoveError::RangeOutOfRange(index))?;
    if board.exit(index).is_some_and(|slot| !slot.exit().is_empty()) {
        return Err(MoveError::AlreadyFired(index));
    }

    let (start_x, start_y) = (entry.x, entry.y);
    let mut direction = entry.direction;

    if sees_ball(board, start_x, start_y, direction, Look::Forward) {
        debug!(index, "Instant hit");
        return Ok(finish(board, index, start_x, start_y, Exit::Hit));
    }
    if sees_ball(board, start_x, start_y, direction, Look::Left)
        || sees_ball(board, start_x, start_y, direction, Look::Right)
    {
        debug!(index, "Instant reflection");
        return Ok(finish(board, index, start_x, start_y, Exit::Reflected));
    }

    let (mut x, mut y) = dims
        .step(start_x, start_y, direction)
        .unwrap_or_else(|| panic!("range index {} does not face the arena", index));

    // Each cell can be entered at most once per heading without repeating.
    let step_limit = 4 * dims.grid_len();
    for _ in 0..step_limit {
        trace!(x, y, %direction, "Laser at");

        if let Some(exit_index) = dims.grid_to_range(x, y) {
            if (x, y) == (start_x, start_y) {
                debug!(index, "Laser came back out where it entered");
                return Ok(finish(board, index, start_x, start_y, Exit::Reflected));
            }
            let ray = board.allocate_ray();
            debug!(index, exit_index, ray, "Laser passed through");
            board.set_range_mark(start_x, start_y, RangeMark::Ray(ray));
            board.set_range_mark(x, y, RangeMark::Ray(ray));
            board.set_exit(index, Exit::PairedWith(exit_index));
            board.set_exit(exit_index, Exit::PairedWith(index));
            return Ok(Exit::PairedWith(exit_index));
        }

        assert!(!board.has_ball(x, y), "laser at ({}, {}) is inside a ball", x, y);

        if sees_ball(board, x, y, direction, Look::Forward) {
            debug!(index, x, y, "Ball ahead, laser absorbed");
            return Ok(finish(board, index, start_x, start_y, Exit::Hit));
        }
        if sees_ball(board, x, y, direction, Look::Left) {
            direction = direction.clockwise();
            trace!(%direction, "Ball to the front-left, turning clockwise");
            continue;
        }
        if sees_ball(board, x, y, direction, Look::Right) {
            direction = direction.counter_clockwise();
            trace!(%direction, "Ball to the front-right, turning counter-clockwise");
            continue;
        }

        (x, y) = dims
            .step(x, y, direction)
            .unwrap_or_else(|| panic!("laser left the grid at ({}, {})", x, y));
    }

    panic!("laser fired from range index {} never left the arena", index);
}

/// Fires every range position not yet fired, leaving `board` with a full exit table.
///
/// # Panics
///
/// Panics if the tracer refuses an unfired slot on the range; that means the
/// board is corrupt.
#[instrument(skip(board))]
pub fn fire_all(board: &mut Board) {
    for index in 0..board.dimensions().range_len() {
        if board.exit(index).is_some_and(|slot| slot.exit().is_empty()) {
            if let Err(e) = fire_laser(board, index) {
                panic!("unfired range index {} was refused: {}", index, e);
            }
        }
    }
}

/// Records a terminal exit (hit or reflection) at the firing position.
fn finish(board: &mut Board, index: usize, x: usize, y: usize, exit: Exit) -> Exit {
    let mark = match exit {
        Exit::Hit => RangeMark::Hit,
        _ => RangeMark::Reflected,
    };
    board.set_range_mark(x, y, mark);
    board.set_exit(index, exit);
    exit
}
