//! The progress-line format mini-language.
//!
//! A format is literal text interleaved with `%` escapes, each naming one field:
//!
//! | Escape | Field |
//! |--------|-------|
//! | `%a`   | absolute progress, `work/end` |
//! | `%p`   | percent, right-justified in 3 columns, followed by `%` |
//! | `%e`   | elapsed time |
//! | `%r`   | estimated remaining time |
//! | `%w`   | animated wheel (spinner) |
//! | `%L`   | load: share of run time spent drawing progress |
//! | `%b`   | bar filling every column the other fields leave free |
//! | `%s`   | next caller-supplied string argument |
//!
//! Any other character after `%` stands for itself, so `%%` prints a literal `%`. A
//! trailing lone `%` ends the format.

use std::{fmt, str::FromStr};

/// One field of a progress line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    /// `%a`
    Absolute,
    /// `%p`
    Percent,
    /// `%e`
    Elapsed,
    /// `%r`
    Remaining,
    /// `%w`
    Wheel,
    /// `%L`
    Load,
    /// `%b`
    Bar,
    /// `%s`
    Arg,
}

impl Field {
    const fn from_escape(c: char) -> Option<Self> {
        Some(match c {
            'a' => Self::Absolute,
            'p' => Self::Percent,
            'e' => Self::Elapsed,
            'r' => Self::Remaining,
            'w' => Self::Wheel,
            'L' => Self::Load,
            'b' => Self::Bar,
            's' => Self::Arg,
            _ => return None,
        })
    }

    const fn escape(self) -> char {
        match self {
            Self::Absolute => 'a',
            Self::Percent => 'p',
            Self::Elapsed => 'e',
            Self::Remaining => 'r',
            Self::Wheel => 'w',
            Self::Load => 'L',
            Self::Bar => 'b',
            Self::Arg => 's',
        }
    }
}

/// A parsed piece of a format.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Text printed as-is. Consecutive literal characters are merged.
    Literal(String),
    /// A field rendered from progress state.
    Field(Field),
}

/// A parsed format string.
///
/// Parsing never fails: malformed escapes degrade to literal text.
///
/// ```
/// use line_progress::format::{Field, Format, Segment};
///
/// let format = Format::parse("%p [%b] 100%%");
/// assert_eq!(format.segments()[0], Segment::Field(Field::Percent));
/// assert_eq!(format.to_string(), "%p [%b] 100%%");
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Format {
    segments: Vec<Segment>,
}

impl Format {
    /// Parses `source` into segments.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                literal.push(c);
                continue;
            }
            let Some(escaped) = chars.next() else {
                break;
            };
            match Field::from_escape(escaped) {
                Some(field) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(field));
                }
                None => literal.push(escaped),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// The parsed segments, in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns `true` if the format contains `field`.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.segments.contains(&Segment::Field(field))
    }
}

impl FromStr for Format {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    for c in text.chars() {
                        if c == '%' {
                            f.write_str("%%")?;
                        } else {
                            write!(f, "{c}")?;
                        }
                    }
                }
                Segment::Field(field) => write!(f, "%{}", field.escape())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Field, Format, Segment};

    /// Full Catalog
    /// Every known escape maps to its field, literals are merged.
    #[test]
    fn test_parse_catalog() {
        let format = Format::parse("%a %p [%b] %w ET: %e, RT: %r %L %s");
        let fields: Vec<Field> = format
            .segments()
            .iter()
            .filter_map(|s| match s {
                Segment::Field(f) => Some(*f),
                Segment::Literal(_) => None,
            })
            .collect();

        assert_eq!(
            fields,
            [
                Field::Absolute,
                Field::Percent,
                Field::Bar,
                Field::Wheel,
                Field::Elapsed,
                Field::Remaining,
                Field::Load,
                Field::Arg,
            ]
        );
        assert_eq!(format.segments()[1], Segment::Literal(" ".into()));
        assert_eq!(format.segments()[3], Segment::Literal(" [".into()));
    }

    /// Unknown Escapes
    /// Unrecognized escapes degrade to the escaped character.
    #[test]
    fn test_unknown_escapes_are_literal() {
        let format = Format::parse("100%% done %q");
        assert_eq!(
            format.segments(),
            [Segment::Literal("100% done q".into())]
        );
        assert!(!format.contains(Field::Bar));
    }

    /// Trailing Percent
    /// A lone `%` at the end terminates the format.
    #[test]
    fn test_trailing_percent() {
        let format = Format::parse("%p%");
        assert_eq!(format.segments(), [Segment::Field(Field::Percent)]);
        assert_eq!(Format::parse("%"), Format::default());
    }

    /// Display
    /// Printing a parsed format yields an equivalent format string.
    #[test]
    fn test_display_reparses() {
        let source = "[%b] %p%% %x";
        let format: Format = source.parse().unwrap();
        assert_eq!(Format::parse(&format.to_string()), format);
    }
}
