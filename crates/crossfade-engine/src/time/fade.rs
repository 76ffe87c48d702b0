use std::cell::Cell;
use std::rc::Rc;

use super::source::{MonotonicClock, TimeSource};

/// Fade factor for `seconds` of elapsed time: `0.5 * sin(t) + 0.5`.
///
/// The result is clamped to `[0, 1]` so rounding can never push it outside the
/// blend range.
pub fn sine_fade(seconds: f64) -> f32 {
    ((seconds.sin() * 0.5 + 0.5) as f32).clamp(0.0, 1.0)
}

/// Shared, externally settable fade factor.
///
/// Values are clamped to `[0, 1]`; NaN is stored as `0`.
#[derive(Debug, Clone, Default)]
pub struct FadeHandle(Rc<Cell<f32>>);

impl FadeHandle {
    pub fn new(value: f32) -> Self {
        let handle = Self::default();
        handle.set(value);
        handle
    }

    pub fn set(&self, value: f32) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.0.set(value);
    }

    pub fn get(&self) -> f32 {
        self.0.get()
    }
}

/// Where the renderer gets its fade factor from each frame.
#[derive(Debug)]
pub enum FadeDriver {
    /// Derived from elapsed time through [`sine_fade`].
    Sine(Box<dyn TimeSource>),
    /// Read from a handle that someone else mutates.
    Manual(FadeHandle),
}

impl FadeDriver {
    /// Sinusoidal fade on the wall clock.
    pub fn sine() -> Self {
        Self::Sine(Box::new(MonotonicClock::new()))
    }

    /// Sinusoidal fade on a caller-provided time source.
    pub fn sine_with(source: impl TimeSource + 'static) -> Self {
        Self::Sine(Box::new(source))
    }

    /// Fixed fade; returns the handle that controls it.
    pub fn manual(initial: f32) -> (Self, FadeHandle) {
        let handle = FadeHandle::new(initial);
        (Self::Manual(handle.clone()), handle)
    }

    /// Current fade factor in `[0, 1]`.
    pub fn factor(&self) -> f32 {
        match self {
            Self::Sine(source) => sine_fade(source.elapsed().as_secs_f64()),
            Self::Manual(handle) => handle.get(),
        }
    }

    /// Restarts the time origin. Manual drivers are unaffected.
    pub fn restart(&mut self) {
        if let Self::Sine(source) = self {
            source.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::time::ManualClock;

    #[test]
    fn sine_fade_stays_in_unit_range() {
        let mut t = 0.0f64;
        while t < 200.0 {
            let f = sine_fade(t);
            assert!((0.0..=1.0).contains(&f), "fade {f} out of range at t={t}");
            t += 0.037;
        }
    }

    #[test]
    fn sine_fade_is_continuous() {
        // |d/dt (0.5 sin t)| <= 0.5, so a small step moves the factor by at most half of it.
        let step = 1e-3f64;
        let mut t = 0.0f64;
        while t < 20.0 {
            let delta = (sine_fade(t + step) - sine_fade(t)).abs();
            assert!(delta <= (step * 0.5) as f32 + 1e-6, "jump of {delta} at t={t}");
            t += 0.01;
        }
    }

    #[test]
    fn sine_fade_known_points() {
        assert!((sine_fade(0.0) - 0.5).abs() < 1e-6);
        assert!((sine_fade(std::f64::consts::FRAC_PI_2) - 1.0).abs() < 1e-6);
        assert!(sine_fade(3.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn fade_handle_clamps() {
        let h = FadeHandle::new(2.0);
        assert_eq!(h.get(), 1.0);
        h.set(-0.25);
        assert_eq!(h.get(), 0.0);
        h.set(f32::NAN);
        assert_eq!(h.get(), 0.0);
        h.set(0.3);
        assert_eq!(h.get(), 0.3);
    }

    #[test]
    fn manual_driver_follows_handle() {
        let (driver, handle) = FadeDriver::manual(0.25);
        assert_eq!(driver.factor(), 0.25);
        handle.set(0.75);
        assert_eq!(driver.factor(), 0.75);
    }

    #[test]
    fn sine_driver_restart_rewinds_to_midpoint() {
        let clock = ManualClock::new();
        let mut driver = FadeDriver::sine_with(clock.clone());

        clock.advance(Duration::from_secs_f64(std::f64::consts::FRAC_PI_2));
        assert!((driver.factor() - 1.0).abs() < 1e-6);

        driver.restart();
        assert!((driver.factor() - 0.5).abs() < 1e-6);
    }
}
