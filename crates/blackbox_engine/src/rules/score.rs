//! Reveal scoring.

use super::super::board::Board;
use super::super::phases::Score;
use tracing::instrument;

/// Counts correct, wrong and missed guesses over the arena.
///
/// A guess on a ball is right, a guess on an empty cell is wrong and an
/// unguessed ball is missed.
#[instrument(skip(board))]
pub fn score(board: &Board) -> Score {
    board
        .arena()
        .fold(Score::default(), |mut score, (_, _, cell)| {
            match (cell.is_guessed(), cell.has_ball()) {
                (true, true) => score.right += 1,
                (true, false) => score.wrong += 1,
                (false, true) => score.missed += 1,
                (false, false) => {}
            }
            score
        })
}
