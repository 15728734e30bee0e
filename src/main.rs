use anyhow::{Context, Result};
use clap::Parser;
use snake_rank::game::GameConfig;
use snake_rank::modes::HumanMode;
use snake_rank::report::LogSink;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_rank")]
#[command(version, about = "Timed grid Snake with score reporting")]
struct Cli {
    /// TOML file with game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Board width (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Board height (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Milliseconds between moves (overrides the config file)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Seed for target placement
    #[arg(long)]
    seed: Option<u64>,

    /// Name attached to submitted scores
    #[arg(long, default_value = "YOU")]
    player: String,

    /// Log output file (the terminal is taken by the game)
    #[arg(long, default_value = "snake_rank.log")]
    log_file: PathBuf,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            // Without a file the start cell follows the board centre
            None => GameConfig::new(
                self.width.unwrap_or(GameConfig::default().board_width),
                self.height.unwrap_or(GameConfig::default().board_height),
            ),
        };

        if let Some(width) = self.width {
            config.board_width = width;
        }
        if let Some(height) = self.height {
            config.board_height = height;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.move_interval_ms = interval_ms;
        }

        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = cli.game_config()?;
    info!(?config, seed = ?cli.seed, player = %cli.player, "Starting Snake Rank");

    let mut human_mode =
        HumanMode::from_config(config, cli.seed, cli.player.clone(), Box::new(LogSink))?;
    human_mode.run().await?;

    Ok(())
}
