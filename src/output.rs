//! Destinations a progress line can be written to.
//!
//! An [`Output`] is a byte sink that can also answer two questions about itself:
//! whether it is an interactive terminal, and how many columns wide it is. Rendering
//! is skipped entirely for non-terminals, so redirecting a program's output to a file
//! never captures progress lines.

use std::io::{self, IsTerminal, Write};

/// Columns assumed when a terminal does not report its width.
pub const FALLBACK_COLUMNS: u16 = 80;

/// A flushable byte sink with terminal capabilities.
pub trait Output: Write {
    /// Returns `true` if this output is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// Returns the terminal width in columns, if it can be determined.
    fn columns(&self) -> Option<u16>;
}

fn terminal_columns() -> Option<u16> {
    crossterm::terminal::size()
        .ok()
        .map(|(cols, _rows)| cols)
        .filter(|&cols| cols > 0)
}

impl Output for io::Stderr {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    fn columns(&self) -> Option<u16> {
        terminal_columns()
    }
}

impl Output for io::Stdout {
    fn is_terminal(&self) -> bool {
        IsTerminal::is_terminal(self)
    }

    fn columns(&self) -> Option<u16> {
        terminal_columns()
    }
}
