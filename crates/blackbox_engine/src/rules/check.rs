//! Guess checking.
//!
//! Layouts with several balls can be ambiguous: two different placements may
//! answer every possible laser identically. A guess is therefore judged by
//! firing every range position at both the hidden layout and the guessed
//! layout and comparing the complete exit tables, not by comparing positions.

use super::super::board::Board;
use super::super::phases::Verdict;
use super::super::types::{Exit, RangeMark};
use super::laser::fire_all;
use super::score::score;
use tracing::{debug, info, instrument};

/// Checks the player's guesses on `board` against its hidden layout.
///
/// Returns the board annotated for display together with the verdict. The
/// input is never modified; all firing happens on independent copies.
///
/// When the layouts are equivalent, the returned board's balls are replaced
/// by the guesses, since both are now proven valid solutions. Otherwise every
/// disagreeing slot is annotated: slots the player fired are flagged wrong,
/// and slots they did not fire are filled in with the hidden layout's answer
/// and flagged omitted.
#[instrument(skip(board))]
pub fn check_guesses(board: &Board) -> (Board, Verdict) {
    let mut solution = board.with_cleared_range();
    let mut guesses = solution.with_guesses_as_balls();
    fire_all(&mut solution);
    fire_all(&mut guesses);

    let dims = board.dimensions();
    let mut result = board.clone();
    let mut consistent = true;

    for index in 0..dims.range_len() {
        let truth = solution.exits()[index].exit();
        if truth == guesses.exits()[index].exit() {
            continue;
        }
        consistent = false;

        let fired_by_player = !board.exits()[index].exit().is_empty();
        if fired_by_player {
            debug!(index, %truth, "Player's laser disagrees with the guess");
            if let Some(slot) = result.exit_mut(index) {
                slot.mark_wrong();
            }
            continue;
        }

        if !result.exits()[index].exit().is_empty() {
            // Already filled in as the far end of an omitted pass-through.
            continue;
        }
        debug!(index, %truth, "Adding omitted laser");
        add_omitted(&mut result, index, truth);
    }

    if consistent {
        info!("Guess is observationally equivalent to the hidden layout");
        adopt_guesses(&mut result);
    }

    let verdict = Verdict {
        consistent,
        score: score(&result),
    };
    (result, verdict)
}

/// Writes the hidden layout's answer for an unfired slot into `board`.
fn add_omitted(board: &mut Board, index: usize, truth: Exit) {
    let dims = board.dimensions();
    let Some(entry) = dims.range_to_grid(index) else {
        return;
    };

    match truth {
        Exit::Hit => board.set_range_mark(entry.x, entry.y, RangeMark::Hit),
        Exit::Reflected => board.set_range_mark(entry.x, entry.y, RangeMark::Reflected),
        Exit::PairedWith(other) => {
            let ray = board.allocate_ray();
            board.set_range_mark(entry.x, entry.y, RangeMark::Ray(ray));
            if let Some(far) = dims.range_to_grid(other) {
                board.set_range_mark(far.x, far.y, RangeMark::Ray(ray));
            }
            board.set_exit(other, Exit::PairedWith(index));
            if let Some(slot) = board.exit_mut(other) {
                slot.mark_omitted();
            }
        }
        Exit::Empty => {}
    }

    board.set_exit(index, truth);
    if let Some(slot) = board.exit_mut(index) {
        slot.mark_omitted();
    }
}

/// Makes the guessed cells the hidden layout.
fn adopt_guesses(board: &mut Board) {
    let dims = board.dimensions();
    for y in 1..=dims.height() {
        for x in 1..=dims.width() {
            if let Some(cell) = board.cell_mut(x, y) {
                let guessed = cell.is_guessed();
                cell.set_ball(guessed);
            }
        }
    }
}
