//! The caller-facing progress handle.
//!
//! A [`ProgressBar`] ties one [`ProgressTracker`] to one [`LineRenderer`], a parsed
//! [`Format`], a [`Clock`] and an [`Output`]. Its hot-path methods are meant to be
//! called on every iteration of a loop:
//!
//! ```no_run
//! use line_progress::ProgressBar;
//!
//! let mut bar = ProgressBar::new(0.0, 1e9);
//! let mut sum = 0.0;
//! for n in 0..1_000_000_000_u64 {
//!     sum += 1.0 / (n as f64 + 1.0);
//!     bar.print(n as f64);
//! }
//! bar.close();
//! ```
//!
//! Between two marks `print` is a single comparison. At a mark the tracker is updated,
//! and when the update is accepted a line is drawn. Time spent in these calls is
//! accounted as self overhead and can be displayed with `%L`.

use std::fmt;

use tracing::{debug, trace};

use crate::{
    builder::ProgressBarBuilder,
    clock::Clock,
    config::Config,
    format::Format,
    output::{FALLBACK_COLUMNS, Output},
    render::LineRenderer,
    tracker::{ProgressTracker, Snapshot},
};

/// A throttled, single-line terminal progress indicator.
///
/// The bar is exclusively owned by the code driving it. It has no background thread
/// and no destructor side effects: call [`close`](Self::close) to draw the final 100%
/// line.
pub struct ProgressBar {
    pub(crate) tracker: ProgressTracker,
    pub(crate) renderer: LineRenderer,
    pub(crate) config: Config,
    pub(crate) format: Format,
    pub(crate) output: Box<dyn Output>,
    pub(crate) clock: Box<dyn Clock>,
}

impl fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBar")
            .field("tracker", &self.tracker)
            .field("format", &self.format.to_string())
            .finish_non_exhaustive()
    }
}

impl ProgressBar {
    /// Creates a bar for work moving from `start` to `end`, drawn on standard error
    /// with the default configuration.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        ProgressBarBuilder::new(start, end).build()
    }

    /// Starts building a bar with custom settings.
    #[must_use]
    pub fn builder(start: f64, end: f64) -> ProgressBarBuilder {
        ProgressBarBuilder::new(start, end)
    }

    // ========================================================================
    // Hot Path
    // ========================================================================

    /// Returns `true` if `work` has reached the next mark.
    #[inline]
    #[must_use]
    pub fn should_accept(&self, work: f64) -> bool {
        self.tracker.should_accept(work)
    }

    /// Updates the derived values for `work` without drawing anything.
    ///
    /// Returns `true` when the update was accepted, i.e. when a caller rendering its
    /// own output should redraw now.
    #[inline]
    pub fn update(&mut self, work: f64) -> bool {
        self.should_accept(work) && self.update_at_mark(work)
    }

    /// Updates for `work` and draws the progress line if the update is accepted.
    #[inline]
    pub fn print(&mut self, work: f64) -> bool {
        self.should_accept(work) && self.print_at_mark(work, &[])
    }

    /// Like [`print`](Self::print), with `args` substituted for the `%s` fields from
    /// left to right.
    #[inline]
    pub fn print_with(&mut self, work: f64, args: &[&str]) -> bool {
        self.should_accept(work) && self.print_at_mark(work, args)
    }

    #[cold]
    fn update_at_mark(&mut self, work: f64) -> bool {
        let now = self.clock.now();
        let accepted = self.tracker.update(work, now);
        self.tracker.add_overhead(self.clock.now() - now);
        accepted
    }

    #[cold]
    fn print_at_mark(&mut self, work: f64, args: &[&str]) -> bool {
        let now = self.clock.now();
        let accepted = self.tracker.update(work, now);
        if accepted {
            trace!(work, fraction_done = self.tracker.fraction_done(), "progress redraw");
            self.draw(work, args, false);
        }
        self.tracker.add_overhead(self.clock.now() - now);
        accepted
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Finishes the task: updates at the end value and draws the 100% line followed by
    /// a newline, whatever the mark or timing.
    ///
    /// Returns the final values.
    pub fn close(self) -> Snapshot {
        self.close_with(&[])
    }

    /// Like [`close`](Self::close), with `args` substituted for the `%s` fields.
    pub fn close_with(mut self, args: &[&str]) -> Snapshot {
        let now = self.clock.now();
        let end = self.tracker.end();
        self.tracker.update(end, now);
        self.draw(end, args, true);
        self.tracker.add_overhead(self.clock.now() - now);

        trace!(
            elapsed = self.tracker.elapsed_time(),
            overhead = self.tracker.self_overhead_time(),
            "progress closed"
        );
        self.tracker.snapshot(end)
    }

    fn draw(&mut self, work: f64, args: &[&str], last: bool) {
        if !self.output.is_terminal() {
            return;
        }
        let columns = self.output.columns().unwrap_or(FALLBACK_COLUMNS);
        let fields = self.tracker.snapshot(work);
        let layout = self.renderer.measure(&self.format, &fields, args);

        let mut line = String::with_capacity(usize::from(columns) + 2);
        line.push('\r');
        self.renderer.render(&layout, columns, &mut line);
        if last {
            line.push('\n');
        }

        let written = self
            .output
            .write_all(line.as_bytes())
            .and_then(|()| self.output.flush());
        if let Err(err) = written {
            debug!(%err, "failed to write progress line");
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// The parsed format.
    #[must_use]
    pub const fn format(&self) -> &Format {
        &self.format
    }

    /// The current appearance and pacing settings, including changes made through
    /// the setters.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the format.
    pub fn set_format(&mut self, format: &str) {
        self.format = Format::parse(format);
        self.config.format = format.into();
    }

    /// Changes the target number of seconds between redraws.
    pub const fn set_update_period(&mut self, seconds: f64) {
        self.tracker.set_update_period(seconds);
        self.config.update_period = seconds;
    }

    /// Changes the bar fill character.
    pub const fn set_bar_fill(&mut self, bar_fill: char) {
        self.renderer.set_bar_fill(bar_fill);
        self.config.bar_fill = bar_fill;
    }

    /// Changes the wheel animation frames.
    pub fn set_wheel(&mut self, wheel: &str) {
        self.renderer.set_wheel(wheel);
        self.config.wheel = wheel.into();
    }

    /// Redirects the progress line to `output`.
    pub fn set_output(&mut self, output: impl Output + 'static) {
        if !output.is_terminal() {
            debug!("progress output is not a terminal, rendering disabled");
        }
        self.output = Box::new(output);
    }

    // ========================================================================
    // State
    // ========================================================================

    /// The underlying tracker, for reading elapsed, remaining and fraction done.
    #[must_use]
    pub const fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    /// The values of the last update.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        self.tracker.snapshot(self.tracker.last_work())
    }
}
