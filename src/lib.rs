//! # `line_progress`
//!
//! A throttled, single-line terminal progress indicator.
//!
//! `line_progress` draws one updating line (percent, absolute progress, a bar that
//! fills the free columns, a spinner wheel, elapsed and remaining time) for a work
//! value moving from a start to an end value. It is designed to be:
//!
//! * **Cheap**: between two *marks* a call costs one comparison, so it can sit in the
//!   innermost loop. Marks are projected from the observed rate so that redraws happen
//!   about every [`update_period`](tracker::DEFAULT_UPDATE_PERIOD) seconds.
//! * **Self-aware**: time spent drawing is measured and can be displayed as a load
//!   percentage with `%L`.
//! * **Unobtrusive**: nothing is written unless the output is a terminal.
//!
//! ```no_run
//! use line_progress::ProgressBar;
//!
//! let mut bar = ProgressBar::new(1.0, 1e8);
//! let mut sum = 0.0;
//! for n in 1..=100_000_000_u64 {
//!     sum += n as f64;
//!     bar.print(n as f64);
//! }
//! bar.close();
//! println!("sum = {sum}");
//! ```
//!
//! ## Modules
//!
//! * [`bar`]: The [`ProgressBar`] handle tying everything together.
//! * [`builder`]: Fluent interface for constructing [`ProgressBar`] instances.
//! * [`clock`]: Time sources, real and manual.
//! * [`config`]: Appearance and pacing settings.
//! * [`format`]: The `%`-escape format mini-language.
//! * [`io`]: Wrappers for [`std::io::Read`] and [`std::io::Write`] that display progress.
//! * [`iter`]: Extension traits for displaying progress of Iterators.
//! * [`output`]: Terminal destinations.
//! * [`render`]: The two-pass line renderer.
//! * [`tracker`]: The progress state machine.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bar;
pub mod builder;
pub mod clock;
pub mod config;
pub mod format;
pub mod io;
pub mod iter;
pub mod output;
pub mod render;
pub mod tracker;

pub use bar::ProgressBar;
pub use builder::ProgressBarBuilder;
pub use config::Config;
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use tracker::{ProgressTracker, Snapshot};
