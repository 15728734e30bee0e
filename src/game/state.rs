use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::info;

use super::board::{Board, Cell};
use super::config::GameConfig;
use super::direction::Direction;
use super::engine::spawn_target;
use super::error::GameError;
use super::time::Timestamp;

/// The snake body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Cell>,
}

impl Snake {
    /// A length-1 snake occupying `head`
    pub fn new(head: Cell) -> Self {
        Self { body: vec![head] }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// All segments, head first
    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    /// Check if any segment, head and tail included, occupies `cell`
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push `new_head` onto the front, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

#[cfg(test)]
impl From<Vec<Cell>> for Snake {
    fn from(body: Vec<Cell>) -> Self {
        assert!(!body.is_empty(), "a snake needs a head");
        Self { body }
    }
}

/// Coarse lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    /// Built or reset, waiting for the start signal
    Waiting,
    /// Ticks advance the simulation
    Running,
    /// Hit a wall or itself; frozen until reset
    Over,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Waiting => "waiting",
            Phase::Running => "running",
            Phase::Over => "over",
        };
        f.write_str(name)
    }
}

/// Read-only view handed to renderers and reporters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Cell>,
    pub target: Option<Cell>,
    pub score: u32,
    pub phase: Phase,
}

/// Complete state of one game
///
/// Mutated only through [`GameState::set_direction`], [`GameState::start`],
/// [`GameState::tick`] and [`GameState::reset`]. Instances are independent; drivers
/// that share one across threads should wrap the whole value in a single lock.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(super) config: GameConfig,
    pub(super) board: Board,
    pub(super) snake: Snake,
    pub(super) pending_direction: Direction,
    pub(super) direction: Direction,
    pub(super) target: Option<Cell>,
    pub(super) score: u32,
    pub(super) phase: Phase,
    pub(super) last_tick: Timestamp,
    pub(super) rng: StdRng,
}

impl GameState {
    /// Create a waiting game with an entropy-seeded target generator
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a waiting game whose target placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        let board = config.validate()?;
        let snake = Snake::new(config.start_cell);
        let target = spawn_target(&board, &snake, config.spawn_attempts, &mut rng);

        Ok(Self {
            board,
            snake,
            pending_direction: config.start_direction,
            direction: config.start_direction,
            target,
            score: 0,
            phase: Phase::Waiting,
            last_tick: Timestamp::ZERO,
            rng,
            config,
        })
    }

    /// Store the direction the next committed tick will use
    ///
    /// Accepted in every phase; the latest call before a tick wins.
    pub fn set_direction(&mut self, direction: Direction) {
        self.pending_direction = direction;
    }

    /// External start signal: `Waiting` to `Running`
    ///
    /// The first move happens one interval after `now`.
    pub fn start(&mut self, now: Timestamp) -> Result<(), GameError> {
        if self.phase != Phase::Waiting {
            return Err(GameError::InvalidTransition {
                action: "start",
                phase: self.phase,
            });
        }

        self.phase = Phase::Running;
        self.last_tick = now;
        info!(head = %self.snake.head(), "Game started");
        Ok(())
    }

    /// Return to `Waiting` with a fresh snake, zero score and a new target
    ///
    /// Legal from `Waiting` or `Over`.
    pub fn reset(&mut self) -> Result<(), GameError> {
        if self.phase == Phase::Running {
            return Err(GameError::InvalidTransition {
                action: "reset",
                phase: self.phase,
            });
        }

        self.snake = Snake::new(self.config.start_cell);
        self.pending_direction = self.config.start_direction;
        self.direction = self.config.start_direction;
        self.target = spawn_target(
            &self.board,
            &self.snake,
            self.config.spawn_attempts,
            &mut self.rng,
        );
        self.score = 0;
        self.phase = Phase::Waiting;
        info!("Game reset");
        Ok(())
    }

    /// Copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.cells().to_vec(),
            target: self.target,
            score: self.score,
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn target(&self) -> Option<Cell> {
        self.target
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direction committed by the last tick
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next tick will commit
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Time of the last committed tick, or of the start signal before the first one
    pub fn last_tick(&self) -> Timestamp {
        self.last_tick
    }
}
