use std::time::{Duration, Instant};

/// Per-session statistics shown next to the board
pub struct GameMetrics {
    /// Start of the current run, `None` between runs
    pub run_started: Option<Instant>,
    /// Run time, frozen once the run ends
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            run_started: None,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        if let Some(started) = self.run_started {
            self.elapsed_time = started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.run_started = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.run_started = None;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
