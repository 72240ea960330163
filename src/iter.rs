//! Iterator adapters for automatic progress display.
//!
//! This module provides the [`ProgressIteratorExt`] trait, which attaches a
//! [`ProgressBar`] to any [`Iterator`] with a single method call. The bar is printed
//! with the number of items yielded so far after every item and closed when the
//! iterator is exhausted.
//!
//! # Example
//!
//! ```no_run
//! use line_progress::ProgressIteratorExt as _;
//!
//! // Bar from 0 to 3, known from the vector's length.
//! for item in vec![1, 2, 3].into_iter().progress() {
//!     // ...
//! }
//! ```

use compact_str::CompactString;

use crate::bar::ProgressBar;

/// An iterator adapter that drives a [`ProgressBar`] from the items it yields.
pub struct ProgressIter<I> {
    iter: I,
    bar: Option<ProgressBar>,
    count: u64,
}

impl<I> ProgressIter<I> {
    /// Creates a new `ProgressIter`.
    ///
    /// Note: This is usually constructed via [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, bar: ProgressBar) -> Self {
        Self {
            iter,
            bar: Some(bar),
            count: 0,
        }
    }

    /// The bar, until the iterator is exhausted and the bar closed.
    #[must_use]
    pub const fn bar(&self) -> Option<&ProgressBar> {
        self.bar.as_ref()
    }

    /// Number of items yielded so far.
    #[must_use]
    pub const fn count_so_far(&self) -> u64 {
        self.count
    }
}

impl<I: Iterator> Iterator for ProgressIter<I> {
    type Item = I::Item;

    #[allow(clippy::cast_precision_loss)]
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next();

        if item.is_some() {
            self.count += 1;
            if let Some(bar) = &mut self.bar {
                bar.print(self.count as f64);
            }
        } else if let Some(bar) = self.bar.take() {
            bar.close();
        }

        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Extension trait to easily attach a progress bar to any Iterator.
pub trait ProgressIteratorExt: Iterator + Sized {
    /// Wraps the iterator in a bar running from 0 to its length.
    fn progress(self) -> ProgressIter<Self>
    where
        Self: ExactSizeIterator,
    {
        self.progress_with_format(crate::config::DEFAULT_FORMAT)
    }

    /// Wraps the iterator in a bar with the given format, running from 0 to its
    /// length.
    #[allow(clippy::cast_precision_loss)]
    fn progress_with_format(self, format: impl Into<CompactString>) -> ProgressIter<Self>
    where
        Self: ExactSizeIterator,
    {
        let bar = ProgressBar::builder(0.0, self.len() as f64)
            .with_format(format)
            .build();
        ProgressIter::new(self, bar)
    }

    /// Wraps the iterator using an existing [`ProgressBar`].
    ///
    /// The bar is printed with the item count, so it should start at 0.
    fn progress_with(self, bar: ProgressBar) -> ProgressIter<Self> {
        ProgressIter::new(self, bar)
    }
}

impl<I: Iterator> ProgressIteratorExt for I {}

#[cfg(test)]
mod tests {
    use super::ProgressIteratorExt as _;
    use crate::{ProgressBar, clock::ManualClock, output::testing::FakeTerminal};

    /// Iterator Integration
    /// The adapter yields every item, redraws as items arrive and closes the bar at
    /// the end.
    #[test]
    fn test_iterator_adapter() {
        let term = FakeTerminal::new(80);
        let clock = ManualClock::new();
        let bar = ProgressBar::builder(0.0, 5.0)
            .with_format("%a")
            .with_output(term.clone())
            .with_clock(clock.clone())
            .build();

        let mut iter = [1, 2, 3, 4, 5].iter().progress_with(bar);
        let mut sum = 0;
        clock.advance(0.2);
        for item in iter.by_ref() {
            sum += item;
            clock.advance(0.2);
        }

        assert_eq!(sum, 15);
        assert_eq!(iter.count_so_far(), 5);
        assert!(iter.bar().is_none(), "exhaustion should close the bar");

        let contents = term.contents();
        assert!(contents.starts_with("\r1/5\r2/5\r3/5"), "{contents:?}");
        assert!(contents.matches('\r').count() > 2, "expected redraws before close");
        assert_eq!(term.last_line(), "5/5");
        assert!(contents.ends_with('\n'));
    }

    /// Length Inference
    /// `progress` sizes the bar from the iterator's length.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_length_inferred() {
        let iter = vec!['a'; 7].into_iter().progress();
        let bar = iter.bar().unwrap();
        assert_eq!(bar.tracker().end(), 7.0);
        assert_eq!(iter.size_hint(), (7, Some(7)));
    }
}
