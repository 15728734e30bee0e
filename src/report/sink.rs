use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Longest player name carried in a record, in characters
pub const MAX_NAME_LEN: usize = 3;

/// A finished run ready to be reported
///
/// Serializes with the `Name` / `Score` field names the rank board expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Score")]
    pub score: u32,
}

impl ScoreRecord {
    /// Build a record, trimming the name and cutting it to [`MAX_NAME_LEN`]
    pub fn new(name: &str, score: u32) -> Self {
        Self {
            name: name.trim().chars().take(MAX_NAME_LEN).collect(),
            score,
        }
    }
}

/// Destination for finished runs
///
/// Failures are reported back to the driver, which logs them and moves on.
pub trait ScoreSink {
    fn submit(&mut self, record: &ScoreRecord) -> Result<()>;
}

/// Writes each record to the log as its JSON payload
#[derive(Debug, Default)]
pub struct LogSink;

impl ScoreSink for LogSink {
    fn submit(&mut self, record: &ScoreRecord) -> Result<()> {
        let payload = serde_json::to_string(record).context("Failed to encode score record")?;
        info!(name = %record.name, score = record.score, %payload, "Score submitted");
        Ok(())
    }
}
