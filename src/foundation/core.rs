use crate::foundation::error::{VizError, VizResult};

/// Timestamp or duration on a caller-driven monotonic clock, in milliseconds.
///
/// The playback layer never reads a clock itself: tests drive it with simulated values, the CLI
/// feeds it elapsed wall-clock time.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

/// Fixed delay between two auto-advance ticks.
pub const TICK_INTERVAL: Millis = Millis(400);

impl Millis {
    /// Zero milliseconds.
    pub const ZERO: Self = Self(0);

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    /// Convert to a [`std::time::Duration`].
    pub fn as_duration(self) -> std::time::Duration {
        std::time::Duration::from_millis(self.0)
    }

    /// Convert from a [`std::time::Duration`], saturating at `u64::MAX` milliseconds.
    pub fn from_duration(d: std::time::Duration) -> Self {
        Self(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Options for the playback controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackOpts {
    /// Delay between successive auto-advance ticks. Must be non-zero.
    pub tick_interval: Millis,
}

impl PlaybackOpts {
    /// Create validated options.
    pub fn new(tick_interval: Millis) -> VizResult<Self> {
        if tick_interval == Millis::ZERO {
            return Err(VizError::validation("tick interval must be > 0 ms"));
        }
        Ok(Self { tick_interval })
    }
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
        }
    }
}

/// Clamp `index` into `[0, len - 1]`. Returns `None` for an empty history.
pub fn clamp_index(index: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(index.min(len - 1))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
