//! The progress-tracking state machine.
//!
//! [`ProgressTracker`] turns a stream of caller-supplied work values into the derived
//! quantities a progress line displays: elapsed time, fraction done, estimated
//! remaining time and the tracker's own load. It is designed around a cheap
//! pre-check:
//!
//! * **Hot path:** [`ProgressTracker::should_accept`] compares the work value with the
//!   current *mark* and nothing else. It is meant to be called on every iteration of a
//!   loop.
//! * **Cold path:** [`ProgressTracker::update`] does the arithmetic and projects the
//!   next mark so that accepted updates land roughly one `update_period` apart,
//!   whatever the speed of the loop.
//!
//! The tracker never reads a clock. Times are passed in as seconds, which keeps it a
//! pure value that is trivial to drive from tests.

/// Default number of seconds between accepted updates.
pub const DEFAULT_UPDATE_PERIOD: f64 = 0.2;

/// Relative deviation of the observed update interval from `update_period` beyond
/// which an update is rejected.
const MAX_PERIOD_DEVIATION: f64 = 0.5;

/// Progress state for one task, moving from `start` to `end`.
///
/// `end` may be smaller than `start`, in which case the work value is expected to
/// decrease.
#[derive(Clone, Debug)]
pub struct ProgressTracker {
    start: f64,
    end: f64,
    increasing: bool,

    mark: f64,
    update_period: f64,

    start_time: f64,
    last_work: f64,
    last_time: f64,
    self_overhead_time: f64,

    // Derived on every update.
    elapsed_time: f64,
    remaining_time: f64,
    fraction_done: f64,
    load_percent: f64,
}

impl ProgressTracker {
    /// Creates a tracker for work moving from `start` to `end`, anchored at `now`
    /// seconds.
    ///
    /// The first call to [`should_accept`](Self::should_accept) with a work value at
    /// or beyond `start` is accepted.
    #[must_use]
    pub fn new(start: f64, end: f64, now: f64) -> Self {
        Self {
            start,
            end,
            increasing: end > start,
            mark: start,
            update_period: DEFAULT_UPDATE_PERIOD,
            start_time: now,
            last_work: start,
            last_time: now,
            self_overhead_time: 0.0,
            elapsed_time: 0.0,
            remaining_time: 0.0,
            fraction_done: 0.0,
            load_percent: 0.0,
        }
    }

    /// Returns `true` if `work` has reached or passed the current mark in the
    /// direction of progress.
    ///
    /// This does not mutate state or touch any clock.
    #[inline]
    #[must_use]
    pub fn should_accept(&self, work: f64) -> bool {
        if self.increasing {
            work >= self.mark
        } else {
            work <= self.mark
        }
    }

    /// Recomputes every derived value for `work` observed at `now`, and projects the
    /// next mark.
    ///
    /// Returns `false` when the time since the previous update differs from
    /// `update_period` by more than 50%. This happens during the first few calls,
    /// while the mark projection is still converging, and callers should not render
    /// then.
    ///
    /// The remaining time is estimated from the rate between this call and the
    /// previous one. If `work` did not move since the previous update the estimate is
    /// not finite; it is passed through unchanged.
    pub fn update(&mut self, work: f64, now: f64) -> bool {
        let dt = now - self.last_time;

        self.elapsed_time = now - self.start_time;
        self.remaining_time = (self.end - work) * dt / (work - self.last_work);
        self.fraction_done = self.fraction_at(work);

        self.mark = work + self.update_period * (self.mark - self.start) / self.elapsed_time;
        if self.past_end(self.mark) {
            self.mark = self.end;
        }

        self.load_percent = 100.0 * self.self_overhead_time / self.elapsed_time;

        self.last_work = work;
        self.last_time = now;

        (1.0 - dt / self.update_period).abs() < MAX_PERIOD_DEVIATION
    }

    /// Adds `seconds` to the time spent inside the progress machinery itself.
    pub fn add_overhead(&mut self, seconds: f64) {
        self.self_overhead_time += seconds;
    }

    /// Normalized progress of `work` relative to the bounds.
    ///
    /// Exactly `1.0` once `work` reaches or passes `end`; also `1.0` for every work
    /// value when `start == end`.
    #[must_use]
    pub fn fraction_at(&self, work: f64) -> f64 {
        let delta = self.end - self.start;
        if delta == 0.0 || self.reached_end(work) {
            1.0
        } else {
            // abs: a decreasing run would otherwise yield -0.0 at the start.
            ((work - self.start) / delta).abs()
        }
    }

    fn reached_end(&self, work: f64) -> bool {
        if self.increasing {
            work >= self.end
        } else {
            work <= self.end
        }
    }

    fn past_end(&self, work: f64) -> bool {
        if self.increasing {
            work > self.end
        } else {
            work < self.end
        }
    }

    /// Captures the derived values together with `work`.
    #[must_use]
    pub const fn snapshot(&self, work: f64) -> Snapshot {
        Snapshot {
            work,
            end: self.end,
            fraction_done: self.fraction_done,
            elapsed_time: self.elapsed_time,
            remaining_time: self.remaining_time,
            load_percent: self.load_percent,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Target number of seconds between accepted updates.
    #[must_use]
    pub const fn update_period(&self) -> f64 {
        self.update_period
    }

    /// Changes the target number of seconds between accepted updates.
    pub const fn set_update_period(&mut self, seconds: f64) {
        self.update_period = seconds;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Work value the task starts from.
    #[must_use]
    pub const fn start(&self) -> f64 {
        self.start
    }

    /// Work value at which the task is complete.
    #[must_use]
    pub const fn end(&self) -> f64 {
        self.end
    }

    /// Whether work is expected to grow from `start` to `end`.
    #[must_use]
    pub const fn is_increasing(&self) -> bool {
        self.increasing
    }

    /// Next work value at which an update will be accepted.
    #[must_use]
    pub const fn mark(&self) -> f64 {
        self.mark
    }

    /// Work value of the last update.
    #[must_use]
    pub const fn last_work(&self) -> f64 {
        self.last_work
    }

    /// Seconds from construction to the last update.
    #[must_use]
    pub const fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Estimated seconds until `end` is reached, as of the last update.
    #[must_use]
    pub const fn remaining_time(&self) -> f64 {
        self.remaining_time
    }

    /// Progress in `[0, 1]` as of the last update.
    #[must_use]
    pub const fn fraction_done(&self) -> f64 {
        self.fraction_done
    }

    /// Share of elapsed time spent in the progress machinery, in percent.
    #[must_use]
    pub const fn load_percent(&self) -> f64 {
        self.load_percent
    }

    /// Cumulative seconds spent in the progress machinery.
    #[must_use]
    pub const fn self_overhead_time(&self) -> f64 {
        self.self_overhead_time
    }
}

/// The values a progress line is rendered from, captured at one update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "rkyv", rkyv(derive(Debug, PartialEq)))]
pub struct Snapshot {
    /// Work value of the update.
    pub work: f64,
    /// Work value at which the task is complete.
    pub end: f64,
    /// Progress in `[0, 1]`.
    pub fraction_done: f64,
    /// Seconds since the tracker was created.
    pub elapsed_time: f64,
    /// Estimated seconds left. May be non-finite.
    pub remaining_time: f64,
    /// Self-overhead load, in percent.
    pub load_percent: f64,
}
