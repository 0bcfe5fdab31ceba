//! Timestamped progress output
//!
//! Build progress goes to stdout as `HH:MM:SS - message` lines. Fatal
//! errors are printed separately by `core::error::print_error`.

use chrono::Local;

fn stamp(msg: &str) -> String {
  format!("{} - {}", Local::now().format("%H:%M:%S"), msg)
}

/// Print a timestamped progress line
pub fn info(msg: impl AsRef<str>) {
  println!("{}", stamp(msg.as_ref()));
}

/// Print a timestamped warning line (non-fatal)
pub fn warn(msg: impl AsRef<str>) {
  println!("{}", stamp(msg.as_ref()));
}

/// Print a timestamped per-target failure line (non-fatal for the run)
pub fn error(msg: impl AsRef<str>) {
  println!("{}", stamp(msg.as_ref()));
}
