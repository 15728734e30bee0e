use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::game::{GameConfig, GameState, Phase, Timestamp};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::report::{ScoreRecord, ScoreSink};

/// Interactive terminal driver
///
/// Polls input and renders at a fixed frame rate, calling `tick` every frame and
/// leaving the move cadence to the game itself.
pub struct HumanMode {
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sink: Box<dyn ScoreSink>,
    player: String,
    epoch: Instant,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(state: GameState, player: impl Into<String>, sink: Box<dyn ScoreSink>) -> Self {
        Self {
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sink,
            player: player.into(),
            epoch: Instant::now(),
            should_quit: false,
        }
    }

    /// Build the game from `config` with an optional fixed seed
    pub fn from_config(
        config: GameConfig,
        seed: Option<u64>,
        player: impl Into<String>,
        sink: Box<dyn ScoreSink>,
    ) -> Result<Self> {
        let state = match seed {
            Some(seed) => GameState::with_seed(config, seed),
            None => GameState::new(config),
        }
        .context("Invalid game configuration")?;

        Ok(Self::new(state, player, sink))
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Poll and render at 30 FPS (33ms per frame)
        let frame_interval = Duration::from_millis(33);
        let mut frame_timer = interval(frame_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Advance and render frame
                _ = frame_timer.tick() => {
                    self.update_game(self.now());
                    self.metrics.update();
                    let snapshot = self.state.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.state.board(), &snapshot, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn now(&self) -> Timestamp {
        Timestamp::elapsed_since(self.epoch)
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action, self.now());
        }
    }

    fn apply_action(&mut self, action: KeyAction, now: Timestamp) {
        match action {
            KeyAction::Steer(direction) => self.state.set_direction(direction),
            KeyAction::Confirm => match self.state.phase() {
                Phase::Waiting => self.start_game(now),
                Phase::Over => self.reset_game(),
                Phase::Running => {}
            },
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn start_game(&mut self, now: Timestamp) {
        match self.state.start(now) {
            Ok(()) => self.metrics.on_game_start(),
            Err(err) => debug!(%err, "Start ignored"),
        }
    }

    fn reset_game(&mut self) {
        if let Err(err) = self.state.reset() {
            debug!(%err, "Reset ignored");
        }
    }

    fn update_game(&mut self, now: Timestamp) {
        let outcome = self.state.tick(now);
        if outcome.is_game_over() {
            let score = self.state.score();
            self.metrics.on_game_over(score);
            info!(?outcome, score, games = self.metrics.games_played, "Run finished");
            self.submit_score(score);
        }
    }

    fn submit_score(&mut self, score: u32) {
        let record = ScoreRecord::new(&self.player, score);
        if let Err(err) = self.sink.submit(&record) {
            let reason = format!("{err:#}");
            warn!(%reason, name = %record.name, score, "Score submission failed");
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Direction};
    use anyhow::anyhow;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingSink {
        records: Arc<Mutex<Vec<ScoreRecord>>>,
        fail: bool,
    }

    impl ScoreSink for RecordingSink {
        fn submit(&mut self, record: &ScoreRecord) -> Result<()> {
            self.records.lock().unwrap().push(record.clone());
            if self.fail {
                return Err(anyhow!("rank board unreachable"));
            }
            Ok(())
        }
    }

    fn corner_mode(sink: RecordingSink) -> HumanMode {
        // Start next to the left wall so one move ends the run.
        let config = GameConfig {
            start_cell: Cell::new(0, 5),
            ..Default::default()
        };
        HumanMode::from_config(config, Some(7), "alice", Box::new(sink)).unwrap()
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::from_config(
            GameConfig::default(),
            Some(1),
            "abc",
            Box::new(RecordingSink::default()),
        )
        .unwrap();
        assert_eq!(mode.state.phase(), Phase::Waiting);
        assert_eq!(mode.state.score(), 0);
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let config = GameConfig {
            board_width: 0,
            ..Default::default()
        };
        let result = HumanMode::from_config(config, None, "abc", Box::new(RecordingSink::default()));
        assert!(result.is_err());
    }

    #[test]
    fn test_confirm_starts_then_acknowledges() {
        let sink = RecordingSink::default();
        let mut mode = corner_mode(sink.clone());

        mode.apply_action(KeyAction::Confirm, at(0));
        assert_eq!(mode.state.phase(), Phase::Running);

        mode.update_game(at(500));
        assert_eq!(mode.state.phase(), Phase::Over);
        assert_eq!(mode.metrics.games_played, 1);

        mode.apply_action(KeyAction::Confirm, at(600));
        assert_eq!(mode.state.phase(), Phase::Waiting);
        assert_eq!(mode.state.snake().head(), Cell::new(0, 5));
    }

    #[test]
    fn test_game_over_submits_bounded_name() {
        let sink = RecordingSink::default();
        let mut mode = corner_mode(sink.clone());

        mode.apply_action(KeyAction::Confirm, at(0));
        mode.update_game(at(250));
        assert!(sink.records.lock().unwrap().is_empty());

        mode.update_game(at(500));
        mode.update_game(at(1_000));

        let records = sink.records.lock().unwrap();
        assert_eq!(records.as_slice(), &[ScoreRecord::new("ali", 0)]);
    }

    #[test]
    fn test_sink_failure_leaves_game_intact() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };
        let mut mode = corner_mode(sink.clone());

        mode.apply_action(KeyAction::Confirm, at(0));
        mode.update_game(at(500));

        assert_eq!(mode.state.phase(), Phase::Over);
        assert_eq!(sink.records.lock().unwrap().len(), 1);
        mode.apply_action(KeyAction::Restart, at(600));
        assert_eq!(mode.state.phase(), Phase::Waiting);
    }

    #[test]
    fn test_steering_is_forwarded() {
        let mut mode = corner_mode(RecordingSink::default());
        mode.apply_action(KeyAction::Confirm, at(0));
        mode.apply_action(KeyAction::Steer(Direction::Up), at(10));
        mode.update_game(at(500));

        assert_eq!(mode.state.phase(), Phase::Running);
        assert_eq!(mode.state.snake().head(), Cell::new(0, 4));
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut mode = corner_mode(RecordingSink::default());
        mode.apply_action(KeyAction::Confirm, at(0));
        mode.apply_action(KeyAction::Restart, at(10));
        assert_eq!(mode.state.phase(), Phase::Running);
    }

    #[test]
    fn test_quit_action() {
        let mut mode = corner_mode(RecordingSink::default());
        mode.apply_action(KeyAction::Quit, at(0));
        assert!(mode.should_quit);
    }
}
