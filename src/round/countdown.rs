//! Round countdown timer
//!
//! A countdown is a start instant plus a duration. Callers pass the current
//! instant in, so rounds can be driven by a real clock or by tests.

use std::time::{Duration, Instant};

/// Remaining time at or below which the clock is shown as a warning
pub const WARNING_THRESHOLD: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    duration: Duration,
    started: Instant,
}

impl Countdown {
    #[must_use]
    pub const fn start(duration: Duration, now: Instant) -> Self {
        Self {
            duration,
            started: now,
        }
    }

    #[inline]
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration.saturating_sub(self.elapsed(now))
    }

    /// Whole seconds left, rounded up so the display reaches 0 only on expiry
    #[must_use]
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        let secs = remaining.as_secs();
        if remaining.subsec_nanos() > 0 {
            secs + 1
        } else {
            secs
        }
    }

    /// Share of the duration still left, from 1.0 down to 0.0
    #[must_use]
    pub fn fraction_remaining(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        self.remaining(now).as_secs_f64() / self.duration.as_secs_f64()
    }

    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }

    #[must_use]
    pub fn is_warning(&self, now: Instant) -> bool {
        let remaining = self.remaining(now);
        !remaining.is_zero() && remaining <= WARNING_THRESHOLD
    }
}
