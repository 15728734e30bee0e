use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::board::{Board, Cell};
use super::direction::Direction;
use super::error::GameError;

/// Construction-time constants for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in cells
    pub board_width: usize,
    /// Height of the board in cells
    pub board_height: usize,
    /// Where the length-1 snake starts after every reset
    pub start_cell: Cell,
    /// Pending and committed direction after every reset
    pub start_direction: Direction,
    /// Minimum time between two committed ticks
    pub move_interval_ms: u64,
    /// Random samples tried before a target falls back to scanning free cells
    pub spawn_attempts: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 10,
            board_height: 10,
            start_cell: Cell::new(5, 5),
            start_direction: Direction::Left,
            move_interval_ms: 500,
            spawn_attempts: 64,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size, starting in the middle
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board_width: width,
            board_height: height,
            start_cell: Cell::new((width / 2) as i32, (height / 2) as i32),
            ..Default::default()
        }
    }

    /// Parse a TOML config file; missing keys take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Check the constants and build the board they describe
    pub fn validate(&self) -> Result<Board, GameError> {
        let board = Board::new(self.board_width, self.board_height)?;

        if !board.contains(self.start_cell) {
            return Err(GameError::StartOutOfBounds {
                cell: self.start_cell,
                width: self.board_width,
                height: self.board_height,
            });
        }

        if self.move_interval_ms == 0 {
            return Err(GameError::ZeroInterval);
        }

        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 10);
        assert_eq!(config.board_height, 10);
        assert_eq!(config.start_cell, Cell::new(5, 5));
        assert_eq!(config.start_direction, Direction::Left);
        assert_eq!(config.move_interval_ms, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config_centres_start() {
        let config = GameConfig::new(15, 9);
        assert_eq!(config.board_width, 15);
        assert_eq!(config.board_height, 9);
        assert_eq!(config.start_cell, Cell::new(7, 4));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_constants() {
        let config = GameConfig {
            board_width: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::EmptyBoard { .. })
        ));

        let config = GameConfig {
            start_cell: Cell::new(10, 0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::StartOutOfBounds { .. })
        ));

        let config = GameConfig {
            move_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(GameError::ZeroInterval));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "board_width = 20\nmove_interval_ms = 125").unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.board_width, 20);
        assert_eq!(config.board_height, 10);
        assert_eq!(config.move_interval_ms, 125);
        assert_eq!(config.start_direction, Direction::Left);
    }

    #[test]
    fn test_checked_in_config_matches_defaults() {
        let config = GameConfig::from_file("snake_rank.toml").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(GameConfig::from_file("does_not_exist.toml").is_err());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "board_width = \"wide\"").unwrap();
        assert!(GameConfig::from_file(file.path()).is_err());
    }
}
