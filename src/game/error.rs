use thiserror::Error;

use super::board::Cell;
use super::state::Phase;

/// Precondition violations raised when building or driving a game
///
/// Collisions and a full board are ordinary game outcomes and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("board must have non-zero dimensions, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },

    #[error("start cell {cell} lies outside the {width}x{height} board")]
    StartOutOfBounds {
        cell: Cell,
        width: usize,
        height: usize,
    },

    #[error("move interval must be at least 1ms")]
    ZeroInterval,

    #[error("cannot {action} a game that is {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },
}
