use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A monotonic source of elapsed time.
///
/// `reset` moves the origin to "now"; `elapsed` is measured from the origin.
pub trait TimeSource: fmt::Debug {
    fn elapsed(&self) -> Duration;
    fn reset(&mut self);
}

/// Wall-clock time source backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    fn reset(&mut self) {
        self.origin = Instant::now();
    }
}

/// Externally driven time source.
///
/// Clones share the same "now", so a test can keep one handle and advance the
/// clock while the renderer owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
    origin: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves "now" forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Sets "now" to an absolute offset.
    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl TimeSource for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now.get().saturating_sub(self.origin)
    }

    fn reset(&mut self) {
        self.origin = self.now.get();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_clones_share_now() {
        let clock = ManualClock::new();
        let observer = clock.clone();

        clock.advance(Duration::from_millis(1500));
        assert_eq!(observer.elapsed(), Duration::from_millis(1500));
    }

    #[test]
    fn manual_clock_reset_moves_origin() {
        let mut clock = ManualClock::new();
        clock.set(Duration::from_secs(10));
        clock.reset();
        assert_eq!(clock.elapsed(), Duration::ZERO);

        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn monotonic_clock_does_not_go_backwards() {
        let clock = MonotonicClock::new();
        let a = clock.elapsed();
        let b = clock.elapsed();
        assert!(b >= a);
    }
}
