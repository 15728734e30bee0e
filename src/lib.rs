//! Snake Rank - a timed grid Snake game
//!
//! This library provides:
//! - Core game state machine (game module), free of I/O
//! - Terminal input mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - Score submission seam (report module)
//! - Interactive driver loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod report;
