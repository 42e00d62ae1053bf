//! Puzzle files for the command-line host.

use blackbox_engine::{BallPosition, Move, PuzzleSpec};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// A puzzle file: arena, hidden layout and an optional default move script.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Arena width.
    width: u8,

    /// Arena height.
    height: u8,

    /// Fewest guesses accepted at reveal (defaults to the ball count).
    #[serde(default)]
    min_balls: Option<usize>,

    /// Most guesses accepted at reveal (defaults to the ball count).
    #[serde(default)]
    max_balls: Option<usize>,

    /// Hidden balls as `[x, y]`, 0-indexed.
    balls: Vec<[u8; 2]>,

    /// Moves replayed by `play` when no script is given on the command line.
    #[serde(default)]
    moves: Vec<String>,
}

impl PuzzleConfig {
    /// Loads a puzzle from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading puzzle from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read puzzle file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse puzzle: {}", e)))?;

        info!(
            width = config.width,
            height = config.height,
            balls = config.balls.len(),
            "Puzzle loaded successfully"
        );
        Ok(config)
    }

    /// Builds the engine's puzzle description, checking it on the way.
    #[instrument(skip(self))]
    pub fn spec(&self) -> Result<PuzzleSpec, ConfigError> {
        let balls = self
            .balls
            .iter()
            .map(|&[x, y]| BallPosition::new(x, y))
            .collect();
        let mut spec = PuzzleSpec::new(self.width, self.height, balls);
        if self.min_balls.is_some() || self.max_balls.is_some() {
            let count = self.balls.len();
            spec = spec.with_ball_range(
                self.min_balls.unwrap_or(count),
                self.max_balls.unwrap_or(count),
            );
        }
        spec.validate()
            .map_err(|e| ConfigError::new(format!("Invalid puzzle: {}", e)))?;
        Ok(spec)
    }

    /// Parses the file's default move script.
    #[instrument(skip(self))]
    pub fn script(&self) -> Result<Vec<Move>, ConfigError> {
        self.moves
            .iter()
            .map(|text| {
                text.parse()
                    .map_err(|e| ConfigError::new(format!("Invalid move in puzzle file: {}", e)))
            })
            .collect()
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_puzzle(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_puzzle() {
        let file = write_puzzle(
            r#"
width = 5
height = 4
min_balls = 1
max_balls = 3
balls = [[0, 0], [4, 3]]
moves = ["F0", "T1,1", "R"]
"#,
        );
        let config = PuzzleConfig::from_file(file.path()).unwrap();
        assert_eq!(*config.width(), 5);
        assert_eq!(config.balls(), &vec![[0, 0], [4, 3]]);

        let spec = config.spec().unwrap();
        assert_eq!((spec.min_balls(), spec.max_balls()), (1, 3));
        assert_eq!(spec.balls()[1], BallPosition::new(4, 3));

        let moves = config.script().unwrap();
        assert_eq!(moves, vec![Move::Fire(0), Move::ToggleBall { x: 1, y: 1 }, Move::Reveal]);
    }

    #[test]
    fn test_optional_fields_default() {
        let file = write_puzzle("width = 3\nheight = 3\nballs = [[1, 1]]\n");
        let config = PuzzleConfig::from_file(file.path()).unwrap();
        assert!(config.moves().is_empty());
        let spec = config.spec().unwrap();
        assert_eq!((spec.min_balls(), spec.max_balls()), (1, 1));
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let file = write_puzzle("width = 3\nheight = 3\nballs = [[3, 1]]\n");
        let config = PuzzleConfig::from_file(file.path()).unwrap();
        let err = config.spec().unwrap_err();
        assert!(err.message.contains("outside the arena"));
    }

    #[test]
    fn test_bad_move_text_rejected() {
        let file = write_puzzle("width = 3\nheight = 3\nballs = []\nmoves = [\"X9\"]\n");
        let config = PuzzleConfig::from_file(file.path()).unwrap();
        assert!(config.script().is_err());
    }

    #[test]
    fn test_missing_file_reports_location() {
        let err = PuzzleConfig::from_file("/nonexistent/puzzle.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read puzzle file"));
        assert!(err.file.ends_with("config.rs"));
    }
}
