//! User-tunable settings of a progress line.

use compact_str::CompactString;

use crate::{
    render::{DEFAULT_BAR_FILL, DEFAULT_WHEEL},
    tracker::DEFAULT_UPDATE_PERIOD,
};

/// Format used when none is given: absolute and percent progress, a bar, the wheel,
/// elapsed and remaining time.
pub const DEFAULT_FORMAT: &str = "%a %p [%b] %w ET: %e, RT: %r";

/// Appearance and pacing of a [`ProgressBar`](crate::ProgressBar).
///
/// With the `serde` feature this can be read from an application's configuration
/// file; missing keys take their default values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Format string, see [`format`](crate::format).
    pub format: CompactString,
    /// Target seconds between redraws.
    pub update_period: f64,
    /// Character filling the bar.
    pub bar_fill: char,
    /// Wheel animation frames, one character each.
    pub wheel: CompactString,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: DEFAULT_FORMAT.into(),
            update_period: DEFAULT_UPDATE_PERIOD,
            bar_fill: DEFAULT_BAR_FILL,
            wheel: DEFAULT_WHEEL.into(),
        }
    }
}
