//! Colored status lines for the terminal.
//!
//! These are the human-facing progress messages printed on stdout. Structured
//! diagnostics go through `tracing` on stderr instead.

use colored::Colorize;

/// Progress or informational line (blue).
pub fn step(msg: impl AsRef<str>) {
    println!("{}", msg.as_ref().bright_blue());
}

/// Completed step (green).
pub fn success(msg: impl AsRef<str>) {
    println!("{}", msg.as_ref().bright_green());
}

/// Non-fatal problem (yellow).
pub fn warning(msg: impl AsRef<str>) {
    println!("{}", msg.as_ref().bright_yellow());
}

/// Failed step (red).
pub fn failure(msg: impl AsRef<str>) {
    println!("{}", msg.as_ref().bright_red());
}
