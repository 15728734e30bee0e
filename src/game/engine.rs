use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use super::{
    board::{Board, Cell},
    state::{GameState, Phase, Snake},
    time::Timestamp,
};

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake ran into one of its own segments
    SelfCollision,
}

/// What a call to [`GameState::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The game is not running
    Idle,
    /// Less than one move interval since the last committed tick
    Throttled,
    /// The snake moved one cell
    Moved { ate_target: bool },
    /// The move was fatal; the game is now over
    Collided(CollisionType),
}

impl TickOutcome {
    /// True on the tick that moved the game into `Over`
    pub fn is_game_over(&self) -> bool {
        matches!(self, TickOutcome::Collided(_))
    }
}

impl GameState {
    /// Advance the simulation by at most one step
    ///
    /// Safe to call every frame: nothing happens until `move_interval_ms` has passed
    /// since the last committed tick, and nothing happens outside `Running`.
    pub fn tick(&mut self, now: Timestamp) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        if now.millis_since(self.last_tick) < self.config.move_interval_ms {
            return TickOutcome::Throttled;
        }

        self.direction = self.pending_direction;
        let new_head = self.snake.head().moved(self.direction);

        if let Some(collision) = self.check_collision(new_head) {
            self.phase = Phase::Over;
            info!(
                ?collision,
                at = %new_head,
                score = self.score,
                length = self.snake.len(),
                "Game over"
            );
            return TickOutcome::Collided(collision);
        }

        let ate_target = self.target == Some(new_head);
        self.snake.advance(new_head, ate_target);

        if ate_target {
            self.score += 1;
            self.target = spawn_target(
                &self.board,
                &self.snake,
                self.config.spawn_attempts,
                &mut self.rng,
            );
            debug!(score = self.score, target = ?self.target, "Target consumed");
        }

        self.last_tick = now;
        debug!(head = %new_head, direction = ?self.direction, "Snake moved");

        TickOutcome::Moved { ate_target }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, cell: Cell) -> Option<CollisionType> {
        if !self.board.contains(cell) {
            return Some(CollisionType::Wall);
        }

        if self.snake.contains(cell) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

/// Pick a uniformly random board cell not covered by the snake
///
/// Tries `attempts` random samples, then chooses among the free cells directly.
/// Returns `None` only when the snake fills the board.
pub(crate) fn spawn_target<R: Rng + ?Sized>(
    board: &Board,
    snake: &Snake,
    attempts: u32,
    rng: &mut R,
) -> Option<Cell> {
    for _ in 0..attempts {
        let cell = board.random_cell(rng);
        if !snake.contains(cell) {
            return Some(cell);
        }
    }

    let free: Vec<Cell> = board.cells().filter(|cell| !snake.contains(*cell)).collect();
    let target = free.choose(rng).copied();

    if target.is_none() {
        warn!(area = board.area(), "Board is full, no target spawned");
    }

    target
}
