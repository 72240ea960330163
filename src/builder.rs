//! Fluent interface for constructing [`ProgressBar`] instances.
//!
//! [`ProgressBar::new`] covers the common case: default look, standard error, real
//! time. The [`ProgressBarBuilder`] is for everything else:
//!
//! * **Appearance:** format string, bar fill character and wheel frames, individually
//!   or all at once from a [`Config`].
//! * **Pacing:** the target period between redraws.
//! * **Collaborators:** the [`Output`] the line goes to and the [`Clock`] time is
//!   read from. Injecting a [`ManualClock`](crate::clock::ManualClock) makes a bar
//!   fully deterministic.

use compact_str::CompactString;
use tracing::{debug, trace};

use crate::{
    bar::ProgressBar,
    clock::{Clock, MonotonicClock},
    config::Config,
    format::Format,
    output::Output,
    render::LineRenderer,
    tracker::ProgressTracker,
};

/// A builder pattern for constructing [`ProgressBar`] instances.
///
/// ```
/// use line_progress::ProgressBar;
///
/// let bar = ProgressBar::builder(100.0, 0.0)
///     .with_format("%p [%b] %w")
///     .with_bar_fill('=')
///     .with_wheel(".oOo")
///     .with_update_period(0.1)
///     .with_output(std::io::stdout())
///     .build();
/// assert!(!bar.tracker().is_increasing());
/// ```
pub struct ProgressBarBuilder {
    start: f64,
    end: f64,
    config: Config,
    output: Option<Box<dyn Output>>,
    clock: Option<Box<dyn Clock>>,
}

impl ProgressBarBuilder {
    /// Starts building a bar for work moving from `start` to `end`.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            config: Config::default(),
            output: None,
            clock: None,
        }
    }

    /// Replaces every appearance and pacing setting at once.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the format string.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<CompactString>) -> Self {
        self.config.format = format.into();
        self
    }

    /// Sets the target number of seconds between redraws.
    #[must_use]
    pub const fn with_update_period(mut self, seconds: f64) -> Self {
        self.config.update_period = seconds;
        self
    }

    /// Sets the bar fill character.
    #[must_use]
    pub const fn with_bar_fill(mut self, bar_fill: char) -> Self {
        self.config.bar_fill = bar_fill;
        self
    }

    /// Sets the wheel animation frames.
    #[must_use]
    pub fn with_wheel(mut self, wheel: impl Into<CompactString>) -> Self {
        self.config.wheel = wheel.into();
        self
    }

    /// Sets where the progress line is written. Defaults to standard error.
    #[must_use]
    pub fn with_output(mut self, output: impl Output + 'static) -> Self {
        self.output = Some(Box::new(output));
        self
    }

    /// Sets the time source. Defaults to a [`MonotonicClock`].
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Consumes the builder and returns the constructed [`ProgressBar`].
    ///
    /// The tracker's start time is read from the clock here.
    #[must_use]
    pub fn build(self) -> ProgressBar {
        let config = self.config;
        let output = self
            .output
            .unwrap_or_else(|| Box::new(std::io::stderr()));
        if !output.is_terminal() {
            debug!("progress output is not a terminal, rendering disabled");
        }
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(MonotonicClock::new()));

        let mut tracker = ProgressTracker::new(self.start, self.end, clock.now());
        tracker.set_update_period(config.update_period);
        trace!(start = self.start, end = self.end, format = %config.format, "progress bar created");

        ProgressBar {
            tracker,
            renderer: LineRenderer::new(config.bar_fill, &config.wheel),
            format: Format::parse(&config.format),
            config,
            output,
            clock,
        }
    }
}
