//! Two-pass rendering of a progress line.
//!
//! The bar field has no natural width: it takes whatever the terminal has left after
//! every other field is drawn. [`LineRenderer`] therefore works in two passes:
//!
//! 1. [`measure`](LineRenderer::measure) formats every field except the bar into a
//!    bounded buffer and adds up the columns used.
//! 2. [`render`](LineRenderer::render) emits the buffered pieces, advances the wheel
//!    and sizes the bar from the leftover columns.

use std::slice;

use compact_str::{CompactString, format_compact};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::{
    format::{Field, Format, Segment},
    tracker::Snapshot,
};

/// Longest text, in characters, a single field may render to. Longer field text is
/// truncated. Widths, unlike this cap, are measured in terminal columns.
pub const MAX_FIELD: usize = 100;

/// Default bar fill character.
pub const DEFAULT_BAR_FILL: char = '#';

/// Default wheel animation frames.
pub const DEFAULT_WHEEL: &str = "|/-\\";

/// Renders a duration in its two coarsest units.
///
/// | Range | Output |
/// |-------|--------|
/// | under a minute | `59s` |
/// | under an hour | `1m0s` |
/// | under a day | `1h1m` |
/// | otherwise | `1d1h` |
///
/// Fractions of a second are truncated. The function is total: NaN renders as `0s`,
/// infinities saturate, negative durations print with a sign.
///
/// ```
/// use line_progress::render::format_duration;
///
/// assert_eq!(format_duration(3661.0), "1h1m");
/// ```
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn format_duration(seconds: f64) -> CompactString {
    let t = seconds as i64;
    if t < 60 {
        return format_compact!("{t}s");
    }
    let (minutes, secs) = (t / 60, t % 60);
    if minutes < 60 {
        return format_compact!("{minutes}m{secs}s");
    }
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours < 24 {
        return format_compact!("{hours}h{minutes}m");
    }
    format_compact!("{}d{}h", hours / 24, hours % 24)
}

fn truncate_field(text: CompactString) -> CompactString {
    match text.char_indices().nth(MAX_FIELD) {
        Some((cut, _)) => CompactString::from(&text[..cut]),
        None => text,
    }
}

fn width_of(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// A measured progress line, ready for the emit pass.
#[derive(Clone, Debug)]
pub struct Layout<'a> {
    pieces: Vec<Piece<'a>>,
    width: usize,
    fraction_done: f64,
}

#[derive(Clone, Debug)]
enum Piece<'a> {
    Literal(&'a str),
    Text(CompactString),
    Wheel,
    Bar,
}

impl Layout<'_> {
    /// Columns taken by everything except the bar.
    #[must_use]
    pub const fn width_excluding_bar(&self) -> usize {
        self.width
    }
}

/// Turns a [`Format`] and a [`Snapshot`] into terminal text.
///
/// The renderer owns the wheel animation state, so each progress line should have
/// its own renderer.
#[derive(Clone, Debug)]
pub struct LineRenderer {
    bar_fill: char,
    wheel: Vec<char>,
    wheel_counter: usize,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_BAR_FILL, DEFAULT_WHEEL)
    }
}

impl LineRenderer {
    /// Creates a renderer filling bars with `bar_fill` and animating the wheel with the
    /// characters of `wheel`.
    #[must_use]
    pub fn new(bar_fill: char, wheel: &str) -> Self {
        Self {
            bar_fill,
            wheel: wheel.chars().collect(),
            wheel_counter: 0,
        }
    }

    /// Character used to fill the bar.
    #[must_use]
    pub const fn bar_fill(&self) -> char {
        self.bar_fill
    }

    /// Changes the bar fill character.
    pub const fn set_bar_fill(&mut self, bar_fill: char) {
        self.bar_fill = bar_fill;
    }

    /// Changes the wheel frames and restarts the animation.
    ///
    /// An empty sequence renders the wheel as a blank column.
    pub fn set_wheel(&mut self, wheel: &str) {
        self.wheel = wheel.chars().collect();
        self.wheel_counter = 0;
    }

    /// First pass: formats every field except the bar and measures the line.
    ///
    /// `args` feed the `%s` fields from left to right; missing arguments render as
    /// empty text.
    #[must_use]
    pub fn measure<'a>(&self, format: &'a Format, fields: &Snapshot, args: &[&str]) -> Layout<'a> {
        let mut args = args.iter();
        let mut pieces = Vec::with_capacity(format.segments().len());
        let mut width = 0;

        for segment in format.segments() {
            let piece = match segment {
                Segment::Literal(text) => {
                    width += width_of(text);
                    Piece::Literal(text)
                }
                Segment::Field(Field::Wheel) => {
                    width += self.wheel_width();
                    Piece::Wheel
                }
                Segment::Field(Field::Bar) => Piece::Bar,
                Segment::Field(field) => {
                    let text = truncate_field(Self::field_text(*field, fields, &mut args));
                    width += width_of(&text);
                    Piece::Text(text)
                }
            };
            pieces.push(piece);
        }

        Layout {
            pieces,
            width,
            fraction_done: fields.fraction_done,
        }
    }

    fn field_text(field: Field, fields: &Snapshot, args: &mut slice::Iter<'_, &str>) -> CompactString {
        match field {
            Field::Absolute => format_compact!("{:.0}/{:.0}", fields.work, fields.end),
            Field::Percent => format_compact!("{:3.0}%", 100.0 * fields.fraction_done),
            Field::Elapsed => format_duration(fields.elapsed_time),
            Field::Remaining => format_duration(fields.remaining_time),
            Field::Load => format_compact!("{:.2}%", fields.load_percent),
            Field::Arg => args.next().map(|s| CompactString::from(*s)).unwrap_or_default(),
            Field::Wheel | Field::Bar => CompactString::default(),
        }
    }

    /// Columns reserved for the wheel: the widest frame. Narrower frames are padded.
    fn wheel_width(&self) -> usize {
        self.wheel.iter().copied().map(char_width).max().unwrap_or(1)
    }

    /// Second pass: appends the measured line to `line`, sizing the bar for a
    /// terminal `columns` wide.
    ///
    /// One column is left unused so that a full line never wraps. A fill character
    /// wider than one column is repeated only as often as it fits; the rest of the
    /// bar is padded with spaces.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn render(&mut self, layout: &Layout<'_>, columns: u16, line: &mut String) {
        for piece in &layout.pieces {
            match piece {
                Piece::Literal(text) => line.push_str(text),
                Piece::Text(text) => line.push_str(text),
                Piece::Wheel => {
                    let frame = self.next_frame();
                    line.push(frame);
                    let pad = self.wheel_width().saturating_sub(char_width(frame));
                    line.extend(std::iter::repeat_n(' ', pad));
                }
                Piece::Bar => {
                    let available = usize::from(columns).saturating_sub(layout.width + 1);
                    let filled =
                        ((available as f64 * layout.fraction_done) as usize).min(available);
                    let fill_width = char_width(self.bar_fill).max(1);
                    let fills = filled / fill_width;
                    line.extend(std::iter::repeat_n(self.bar_fill, fills));
                    line.extend(std::iter::repeat_n(' ', available - fills * fill_width));
                }
            }
        }
    }

    fn next_frame(&mut self) -> char {
        if self.wheel.is_empty() {
            return ' ';
        }
        self.wheel_counter = (self.wheel_counter + 1) % self.wheel.len();
        self.wheel[self.wheel_counter]
    }

    /// Runs both passes and returns the line.
    #[must_use]
    pub fn line(&mut self, format: &Format, fields: &Snapshot, args: &[&str], columns: u16) -> String {
        let layout = self.measure(format, fields, args);
        let mut line = String::with_capacity(usize::from(columns));
        self.render(&layout, columns, &mut line);
        line
    }
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr as _;

    use super::{LineRenderer, MAX_FIELD, format_duration};
    use crate::{format::Format, tracker::Snapshot};

    fn snapshot(fraction_done: f64) -> Snapshot {
        Snapshot {
            work: 100.0 * fraction_done,
            end: 100.0,
            fraction_done,
            elapsed_time: 75.0,
            remaining_time: 3661.0,
            load_percent: 0.25,
        }
    }

    /// Duration Units
    /// Each range uses its two coarsest units.
    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0.0), "0s");
        assert_eq!(format_duration(59.0), "59s");
        assert_eq!(format_duration(59.9), "59s");
        assert_eq!(format_duration(60.0), "1m0s");
        assert_eq!(format_duration(3599.0), "59m59s");
        assert_eq!(format_duration(3661.0), "1h1m");
        assert_eq!(format_duration(86_399.0), "23h59m");
        assert_eq!(format_duration(90_000.0), "1d1h");
    }

    /// Degenerate Durations
    /// Non-finite and negative inputs still produce text.
    #[test]
    fn test_format_duration_total() {
        assert_eq!(format_duration(f64::NAN), "0s");
        assert_eq!(format_duration(-5.0), "-5s");
        assert!(format_duration(f64::INFINITY).ends_with('h'));
    }

    /// Field Text
    /// Each field renders with its fixed textual layout.
    #[test]
    fn test_field_text() {
        let format = Format::parse("%a|%p|%e|%r|%L|%%");
        let line = LineRenderer::default().line(&format, &snapshot(0.5), &[], 80);
        assert_eq!(line, "50/100| 50%|1m15s|1h1m|0.25%|%");
    }

    /// Width Round Trip
    /// Without a bar, the emitted line is exactly as wide as measured.
    #[test]
    fn test_measure_matches_render_without_bar() {
        let format = Format::parse("%w %p (%s) ET: %e RT: %r %a é %s");
        let renderer = LineRenderer::default();
        let fields = snapshot(0.37);
        let args = ["first", "zweite"];

        let layout = renderer.measure(&format, &fields, &args);
        let mut line = String::new();
        renderer.clone().render(&layout, 200, &mut line);

        assert_eq!(line.width(), layout.width_excluding_bar());
    }

    /// Wide Characters
    /// Double-width text is measured in columns, so the bar still fits the line.
    #[test]
    fn test_wide_text_keeps_line_within_columns() {
        let mut renderer = LineRenderer::default();
        let line = renderer.line(&Format::parse("%s[%b]"), &snapshot(0.5), &["日本語版"], 20);

        // 8 columns of text, 2 of brackets, 1 reserved: 9 for the bar.
        assert_eq!(line, format!("日本語版[{}{}]", "#".repeat(4), " ".repeat(5)));
        assert_eq!(line.width(), 19);
        assert!(line.width() < 20);
    }

    /// Wide Wheel & Fill
    /// Mixed-width wheel frames are padded to the widest, wide fill characters
    /// are counted by columns.
    #[test]
    fn test_wide_wheel_and_fill() {
        let mut renderer = LineRenderer::new('＃', "a中");
        let format = Format::parse("%w[%b]");

        let first = renderer.line(&format, &snapshot(0.5), &[], 15);
        let second = renderer.line(&format, &snapshot(0.5), &[], 15);

        // 2 wheel columns, 2 brackets, 1 reserved: 10 for the bar, 5 filled.
        assert_eq!(first, "中[＃＃      ]");
        assert_eq!(second, "a [＃＃      ]");
        assert_eq!(first.width(), 14);
        assert_eq!(second.width(), 14);
    }

    /// Bar Sizing
    /// Twenty available columns at half progress are ten fill and ten blank.
    #[test]
    fn test_bar_sizing() {
        let mut renderer = LineRenderer::default();

        let line = renderer.line(&Format::parse("%b"), &snapshot(0.5), &[], 21);
        assert_eq!(line, format!("{}{}", "#".repeat(10), " ".repeat(10)));

        let line = renderer.line(&Format::parse("[%b]"), &snapshot(0.5), &[], 23);
        assert_eq!(line, format!("[{}{}]", "#".repeat(10), " ".repeat(10)));
    }

    /// Over-Full Bar
    /// Fractions beyond 1 fill the bar without overflowing the line.
    #[test]
    fn test_bar_overflow_clamped() {
        let mut renderer = LineRenderer::new('=', "|/-\\");
        let line = renderer.line(&Format::parse("[%b]"), &snapshot(1.7), &[], 23);
        assert_eq!(line, format!("[{}]", "=".repeat(20)));
    }

    /// Narrow Terminal
    /// When the other fields use every column, the bar collapses to nothing.
    #[test]
    fn test_bar_no_room() {
        let mut renderer = LineRenderer::default();
        let line = renderer.line(&Format::parse("abcdef%b"), &snapshot(0.5), &[], 4);
        assert_eq!(line, "abcdef");
    }

    /// Wheel Animation
    /// Every emitted wheel advances one frame and wraps, independent of position.
    #[test]
    fn test_wheel_cycles() {
        let mut renderer = LineRenderer::default();
        let format = Format::parse("%w%w");
        let fields = snapshot(0.0);

        assert_eq!(renderer.line(&format, &fields, &[], 80), "/-");
        assert_eq!(renderer.line(&format, &fields, &[], 80), "\\|");

        renderer.set_wheel(".oO");
        assert_eq!(renderer.line(&format, &fields, &[], 80), "oO");

        renderer.set_wheel("");
        assert_eq!(renderer.line(&format, &fields, &[], 80), "  ");
    }

    /// String Arguments
    /// `%s` consumes arguments in order; missing ones are empty.
    #[test]
    fn test_string_arguments() {
        let mut renderer = LineRenderer::default();
        let format = Format::parse("<%s|%s|%s>");
        let line = renderer.line(&format, &snapshot(0.0), &["a", "bc"], 80);
        assert_eq!(line, "<a|bc|>");
    }

    /// Field Truncation
    /// Field text is capped, literal text is not.
    #[test]
    fn test_field_truncation() {
        let long = "x".repeat(MAX_FIELD + 20);
        let mut renderer = LineRenderer::default();
        let line = renderer.line(&Format::parse("%s"), &snapshot(0.0), &[&long], 300);
        assert_eq!(line.len(), MAX_FIELD);

        let line = renderer.line(&Format::parse(&long), &snapshot(0.0), &[], 300);
        assert_eq!(line.len(), MAX_FIELD + 20);
    }
}
