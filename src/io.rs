//! I/O wrappers for displaying data transfer progress.
//!
//! This module provides [`ProgressReader`] and [`ProgressWriter`], which wrap any
//! implementation of [`std::io::Read`] or [`std::io::Write`].
//!
//! # Mechanics
//!
//! These wrappers act as "pass-through" middleware. Every byte successfully read or
//! written moves the work value one unit from the bar's start value toward its end
//! value (down for a decreasing bar), and the bar is printed. Between marks this costs one addition and one comparison per
//! `read` or `write` call. Useful for:
//!
//! * File copies, downloads and uploads.
//! * Hashing large files.
//! * Compressing/Decompressing data streams.
//!
//! Call `finish` when the transfer is complete to draw the 100% line and get the
//! inner stream back.

use std::io::{self, Read, Write};

use crate::bar::ProgressBar;

/// Byte counter shared by both wrappers.
#[derive(Debug)]
struct Transfer {
    bar: ProgressBar,
    bytes: u64,
}

impl Transfer {
    const fn new(bar: ProgressBar) -> Self {
        Self { bar, bytes: 0 }
    }

    #[allow(clippy::cast_precision_loss)]
    fn advance(&mut self, n: usize) {
        self.bytes += n as u64;
        let tracker = self.bar.tracker();
        let work = if tracker.is_increasing() {
            tracker.start() + self.bytes as f64
        } else {
            tracker.start() - self.bytes as f64
        };
        self.bar.print(work);
    }
}

/// A wrapper around [`Read`] that prints a [`ProgressBar`] as bytes are read.
#[derive(Debug)]
pub struct ProgressReader<R> {
    inner: R,
    transfer: Transfer,
}

impl<R> ProgressReader<R> {
    /// Creates a new `ProgressReader` wrapping `inner`, reporting to `bar`.
    pub const fn new(inner: R, bar: ProgressBar) -> Self {
        Self {
            inner,
            transfer: Transfer::new(bar),
        }
    }

    /// Bytes read so far.
    #[must_use]
    pub const fn bytes_transferred(&self) -> u64 {
        self.transfer.bytes
    }

    /// Closes the bar and returns the wrapped reader.
    pub fn finish(self) -> R {
        self.transfer.bar.close();
        self.inner
    }
}

impl<R: Read> Read for ProgressReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.transfer.advance(n);
        Ok(n)
    }
}

/// A wrapper around [`Write`] that prints a [`ProgressBar`] as bytes are written.
#[derive(Debug)]
pub struct ProgressWriter<W> {
    inner: W,
    transfer: Transfer,
}

impl<W> ProgressWriter<W> {
    /// Creates a new `ProgressWriter` wrapping `inner`, reporting to `bar`.
    pub const fn new(inner: W, bar: ProgressBar) -> Self {
        Self {
            inner,
            transfer: Transfer::new(bar),
        }
    }

    /// Bytes written so far.
    #[must_use]
    pub const fn bytes_transferred(&self) -> u64 {
        self.transfer.bytes
    }

    /// Closes the bar and returns the wrapped writer.
    pub fn finish(self) -> W {
        self.transfer.bar.close();
        self.inner
    }
}

impl<W: Write> Write for ProgressWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.transfer.advance(n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read as _, Write as _};

    use super::{ProgressReader, ProgressWriter};
    use crate::{ProgressBar, clock::ManualClock, output::testing::FakeTerminal};

    fn bar_on(term: &FakeTerminal, clock: &ManualClock, start: f64, end: f64) -> ProgressBar {
        ProgressBar::builder(start, end)
            .with_format("%a")
            .with_output(term.clone())
            .with_clock(clock.clone())
            .build()
    }

    /// Reader Tracking
    /// Bytes read are counted, redrawn while reading, and the final line shows the
    /// total.
    #[test]
    fn test_io_reader() {
        let term = FakeTerminal::new(80);
        let clock = ManualClock::new();
        let data = vec![0u8; 100];
        let mut reader = ProgressReader::new(Cursor::new(&data), bar_on(&term, &clock, 0.0, 100.0));

        let mut buf = [0u8; 10];
        for _ in 0..3 {
            clock.advance(0.2);
            reader.read_exact(&mut buf).unwrap();
        }
        assert_eq!(reader.bytes_transferred(), 30);
        assert!(term.contents().starts_with("\r10/100\r20/100\r30/100"));

        let mut rest = Vec::new();
        reader.read_to_end(&mut rest).unwrap();
        assert_eq!(reader.bytes_transferred(), 100);

        let cursor = reader.finish();
        assert_eq!(cursor.position(), 100);
        assert_eq!(term.last_line(), "100/100");
    }

    /// Writer Tracking
    /// Bytes written are counted and the inner writer is returned intact.
    #[test]
    fn test_io_writer() {
        let term = FakeTerminal::new(80);
        let clock = ManualClock::new();
        let mut writer = ProgressWriter::new(Vec::new(), bar_on(&term, &clock, 0.0, 5.0));

        clock.advance(0.2);
        writer.write_all(&[1, 2, 3, 4, 5]).unwrap();
        assert_eq!(writer.bytes_transferred(), 5);
        assert_eq!(term.contents(), "\r5/5");

        let inner = writer.finish();
        assert_eq!(inner, [1u8, 2, 3, 4, 5]);
        assert_eq!(term.last_line(), "5/5");
    }

    /// Decreasing Bar
    /// On a bar counting down, transferred bytes move the work value down too, so
    /// the line is redrawn during the transfer.
    #[test]
    fn test_io_writer_decreasing_bar() {
        let term = FakeTerminal::new(80);
        let clock = ManualClock::new();
        let bar = ProgressBar::builder(10.0, 0.0)
            .with_format("%p")
            .with_output(term.clone())
            .with_clock(clock.clone())
            .build();
        let mut writer = ProgressWriter::new(Vec::new(), bar);

        for chunk in [[0u8; 2], [1; 2]] {
            clock.advance(0.2);
            writer.write_all(&chunk).unwrap();
        }
        assert_eq!(term.contents(), "\r 20%\r 40%");

        writer.finish();
        assert_eq!(term.last_line(), "100%");
    }
}
