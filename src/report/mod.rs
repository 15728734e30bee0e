//! Score submission seam
//!
//! The game core only exposes the final score and the game-over transition. What
//! happens to a finished run is up to a [`ScoreSink`].

pub mod sink;

pub use sink::{LogSink, MAX_NAME_LEN, ScoreRecord, ScoreSink};
