//! Monotonic wall-clock timestamps in fractional seconds.

use std::sync::OnceLock;
use std::time::Instant;

static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Seconds elapsed since the first call in this process.
pub fn rtclock() -> f64 {
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Source of timestamps for timed phases.
pub trait Clock {
    /// Current time in seconds. Only differences between calls are meaningful.
    fn now(&self) -> f64;

    /// Runs `f` and returns its output with the elapsed seconds.
    fn time<R>(&self, f: impl FnOnce() -> R) -> (R, f64) {
        let start = self.now();
        let out = f();
        let end = self.now();
        (out, end - start)
    }
}

/// The process-wide monotonic clock behind [`rtclock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        rtclock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rtclock_is_monotonic() {
        let t0 = rtclock();
        std::thread::sleep(Duration::from_millis(5));
        let t1 = rtclock();
        assert!(t1 >= t0 + 0.004, "{t1} should be at least 4ms after {t0}");
    }

    #[test]
    fn test_time_returns_output_and_duration() {
        let (value, secs) = MonotonicClock.time(|| {
            std::thread::sleep(Duration::from_millis(2));
            7
        });
        assert_eq!(value, 7);
        assert!(secs > 0.0);
    }
}
