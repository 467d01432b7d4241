//! UI helper functions for terminal output formatting.
//!
//! Keeps the error/warning prefixes consistent across commands.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Print a table view followed by a blank separator line.
pub fn write_view(out: &mut dyn Write, view: &str) -> std::io::Result<()> {
    write!(out, "{}", view)?;
    if !view.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out)
}
