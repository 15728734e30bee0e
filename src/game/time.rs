use std::time::Instant;

/// Millisecond timestamp supplied by the driver to `GameState::tick`
///
/// The origin is whatever the driver chooses; only differences matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, zero if `earlier` is in the future
    pub fn millis_since(&self, earlier: Timestamp) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Timestamp for "now" measured from a driver-owned epoch
    pub fn elapsed_since(epoch: Instant) -> Self {
        let millis = u64::try_from(epoch.elapsed().as_millis()).unwrap_or(u64::MAX);
        Self(millis)
    }
}
