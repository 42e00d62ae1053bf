//! Text and JSON rendering of puzzle results.

use crate::cli::OutputFormat;
use blackbox_engine::{Board, Exit, Move, Outcome, Phase, Puzzle};
use serde::Serialize;
use std::fmt::Write;

/// One row of the exit table.
#[derive(Debug, Clone, Serialize)]
pub struct ExitRow {
    /// Range index.
    pub index: usize,
    /// Exit value.
    pub exit: Exit,
    /// Filled in at reveal, never fired by the player.
    pub omitted: bool,
    /// Fired by the player and answered differently by the guess.
    pub wrong: bool,
}

/// Everything printed for a puzzle.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Phase reached.
    pub phase: Phase,
    /// One-line summary.
    pub status: String,
    /// Board drawing.
    pub board: String,
    /// Exit table, unfired slots included.
    pub exits: Vec<ExitRow>,
    /// Reveal outcome.
    pub outcome: Option<Outcome>,
    /// Moves accepted.
    pub history: Vec<String>,
    /// Moves rejected, with the reason.
    pub rejected: Vec<String>,
}

impl Report {
    /// Builds the report for a puzzle snapshot.
    pub fn new(puzzle: &Puzzle, rejected: Vec<(Move, String)>) -> Self {
        Self {
            phase: puzzle.phase(),
            status: puzzle.status_string(),
            board: puzzle.display(),
            exits: exit_rows(puzzle.board()),
            outcome: puzzle.outcome().copied(),
            history: puzzle.history().iter().map(Move::to_string).collect(),
            rejected: rejected
                .into_iter()
                .map(|(action, reason)| format!("{}: {}", action, reason))
                .collect(),
        }
    }

    /// Builds a report for a fully traced board, balls shown, as produced by `trace`.
    pub fn for_board(board: &Board) -> Self {
        Self {
            phase: Phase::Revealed,
            status: format!("{} balls", board.ball_count()),
            board: board.display(true),
            exits: exit_rows(board),
            outcome: None,
            history: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Renders the report in the requested format.
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => Ok(self.to_text()),
        }
    }

    fn to_text(&self) -> String {
        let mut out = self.board.clone();
        out.push('\n');
        for row in self.exits.iter().filter(|row| !row.exit.is_empty()) {
            let mut flags = String::new();
            if row.omitted {
                flags.push_str(" (omitted)");
            }
            if row.wrong {
                flags.push_str(" (wrong)");
            }
            // Writing into a String cannot fail.
            let _ = writeln!(out, "{:>3} -> {}{}", row.index, row.exit, flags);
        }
        for rejection in &self.rejected {
            let _ = writeln!(out, "rejected {}", rejection);
        }
        let _ = writeln!(out, "{}", self.status);
        out
    }
}

fn exit_rows(board: &Board) -> Vec<ExitRow> {
    board
        .exits()
        .iter()
        .enumerate()
        .map(|(index, slot)| ExitRow {
            index,
            exit: slot.exit(),
            omitted: slot.is_omitted(),
            wrong: slot.is_wrong(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackbox_engine::{BallPosition, PuzzleSpec};

    fn puzzle(script: &str) -> Puzzle {
        let game = PuzzleSpec::new(3, 3, vec![BallPosition::new(1, 1)])
            .start()
            .unwrap();
        Puzzle::from(game)
            .replay(&Move::parse_script(script).unwrap())
            .unwrap()
    }

    #[test]
    fn test_text_lists_fired_exits_only() {
        let report = Report::new(&puzzle("F1"), Vec::new());
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.contains("  1 -> H"));
        assert!(!text.contains("  0 ->"));
        assert!(text.ends_with("Guessing. 0 guesses placed (need 1-1).\n"));
    }

    #[test]
    fn test_board_report_shows_balls_and_every_exit() {
        let mut board = PuzzleSpec::new(3, 3, vec![BallPosition::new(1, 1)])
            .build_board()
            .unwrap();
        blackbox_engine::fire_all(&mut board);
        let report = Report::for_board(&board);
        assert_eq!(report.phase, Phase::Revealed);
        assert_eq!(report.status, "1 balls");
        assert!(report.board.contains('O'));
        assert!(report.exits.iter().all(|row| !row.exit.is_empty()));
    }

    #[test]
    fn test_json_carries_outcome() {
        let report = Report::new(&puzzle("T2,2 R"), vec![(Move::Fire(40), "nope".to_string())]);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["phase"], "Revealed");
        assert!(json["outcome"]["Checked"]["consistent"].as_bool().unwrap());
        assert_eq!(json["rejected"][0], "F40: nope");
        assert_eq!(json["history"][1], "R");
    }
}
