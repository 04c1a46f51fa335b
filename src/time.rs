//! Time source for claim validation
//!
//! Validation never reads the host clock directly. Decoders own a [`Clock`],
//! so tests can pin the current instant with [`FixedClock`].

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the current instant (UTC)
pub trait Clock {
    /// The current instant
    fn now(&self) -> SystemTime;

    /// The current instant in whole seconds since the Unix epoch
    fn unix_timestamp(&self) -> i64 {
        unix_timestamp(self.now())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}

/// The host's wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(SystemTime);

impl FixedClock {
    /// Freeze the clock at the given instant
    pub fn new(instant: SystemTime) -> Self {
        Self(instant)
    }

    /// Freeze the clock at whole seconds since the Unix epoch
    pub fn at(seconds: i64) -> Self {
        let offset = Duration::from_secs(seconds.unsigned_abs());
        let instant = if seconds >= 0 {
            UNIX_EPOCH + offset
        } else {
            UNIX_EPOCH - offset
        };
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

/// Whole seconds since the Unix epoch, negative before it
pub fn unix_timestamp(instant: SystemTime) -> i64 {
    match instant.duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(before) => i64::try_from(before.duration().as_secs())
            .map(|secs| -secs)
            .unwrap_or(i64::MIN),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(1_700_000_000);
        assert_eq!(clock.unix_timestamp(), 1_700_000_000);
        assert_eq!((&clock).unix_timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_fixed_clock_before_epoch() {
        assert_eq!(FixedClock::at(-30).unix_timestamp(), -30);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.unix_timestamp() > 1_600_000_000);
    }
}
