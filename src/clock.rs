//! Time sources for progress tracking.
//!
//! The tracker itself never reads a clock: every operation that needs the current
//! time receives it as an `f64` number of seconds. [`ProgressBar`](crate::ProgressBar)
//! obtains those values from a [`Clock`], which makes the whole pipeline testable with
//! a [`ManualClock`].

use std::{cell::Cell, rc::Rc};

use web_time::Instant;

/// A monotonic source of time, in seconds.
///
/// Only differences between readings are meaningful; the origin is arbitrary.
pub trait Clock {
    /// Returns the current time in seconds.
    fn now(&self) -> f64;
}

/// The default clock, backed by [`Instant`].
///
/// Readings are seconds since the clock was created and are immune to wall-clock
/// adjustments.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is the current instant.
    #[must_use]
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

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can hand one clone to a
/// [`ProgressBar`](crate::ProgressBar) and keep another to drive time forward.
///
/// ```
/// use line_progress::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(0.25);
/// assert!((clock.now() - 0.25).abs() < f64::EPSILON);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Creates a clock reading zero seconds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current reading.
    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, MonotonicClock};

    /// Monotonicity
    /// Successive readings never go backwards.
    #[test]
    fn test_monotonic_clock() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(a >= 0.0);
        assert!(b >= a);
    }

    /// Shared Manual Time
    /// Clones observe the same reading.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_manual_clock_shared() {
        let clock = ManualClock::new();
        let other = clock.clone();

        other.advance(1.5);
        assert_eq!(clock.now(), 1.5);

        clock.set(10.0);
        assert_eq!(other.now(), 10.0);
    }
}
