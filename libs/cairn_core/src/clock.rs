//! Injectable time source.
//!
//! Blocks capture their creation time through a `Clock` value rather than
//! calling into the system directly, so tests can assemble chains with
//! fully deterministic timestamps.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of wall-clock-like time in unix milliseconds.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// The real system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

/// A clock that starts at a fixed instant and advances by a fixed step on
/// every reading. Timestamps it hands out are strictly increasing.
#[derive(Debug)]
pub struct SteppingClock {
    now: AtomicU64,
    step: u64,
}

impl SteppingClock {
    pub fn new(start_millis: u64, step_millis: u64) -> Self {
        SteppingClock {
            now: AtomicU64::new(start_millis),
            step: step_millis,
        }
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> u64 {
        self.now.fetch_add(self.step, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepping_clock_advances() {
        let clock = SteppingClock::new(1_000, 250);
        assert_eq!(clock.now_millis(), 1_000);
        assert_eq!(clock.now_millis(), 1_250);
        assert_eq!(clock.now_millis(), 1_500);
    }

    #[test]
    fn test_system_clock_is_monotonic_enough() {
        let clock = SystemClock;
        let a = clock.now_millis();
        let b = clock.now_millis();
        assert!(b >= a);
    }
}
