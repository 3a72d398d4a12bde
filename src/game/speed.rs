use std::fmt;
use std::time::Duration;

/// Time between ticks in milliseconds, always within `[MIN_MS, MAX_MS]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickSpeed(u64);

impl TickSpeed {
    pub const MIN_MS: u64 = 40;
    pub const MAX_MS: u64 = 250;
    pub const DEFAULT_MS: u64 = 120;
    /// Change applied by one press of the faster/slower keys
    pub const STEP_MS: u64 = 10;

    /// Clamp `ms` into the allowed range
    pub fn new(ms: u64) -> Self {
        Self(ms.clamp(Self::MIN_MS, Self::MAX_MS))
    }

    pub fn millis(&self) -> u64 {
        self.0
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Shorter interval, so the snake moves faster
    pub fn faster(&self) -> Self {
        Self::new(self.0.saturating_sub(Self::STEP_MS))
    }

    /// Longer interval, so the snake moves slower
    pub fn slower(&self) -> Self {
        Self::new(self.0 + Self::STEP_MS)
    }
}

impl Default for TickSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT_MS)
    }
}

impl fmt::Display for TickSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}
