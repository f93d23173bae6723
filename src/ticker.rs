use std::time::{Duration, Instant};

/// Refresh interval of the blocking text menu
pub const TEXT_TICK_MS: u64 = 1000;

/// Refresh interval of the terminal window
pub const WINDOW_TICK_MS: u64 = 100;

/// A periodic callback schedule. Each shell decides how to wait until the
/// next tick (sleeping vs. polling for input); the ticker only says when.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// How long the shell may block before the next tick is due
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }

    /// True once per elapsed interval. Missed ticks are coalesced rather than
    /// replayed, so a slow frame never triggers a burst of callbacks.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}
