//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers feed it directions and timestamps and read back snapshots.

pub mod board;
pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod state;
pub mod time;

// Re-export commonly used types
pub use board::{Board, Cell};
pub use config::GameConfig;
pub use direction::Direction;
pub use engine::{CollisionType, TickOutcome};
pub use error::GameError;
pub use state::{GameState, Phase, Snake, Snapshot};
pub use time::Timestamp;
