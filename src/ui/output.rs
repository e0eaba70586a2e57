//! ui::output
//!
//! Output formatting and the fatal-abort helper.
//!
//! # Design
//!
//! Output respects the verbosity level. Debug mode (set via the
//! `FORGEWRAP_DEBUG` environment variable) echoes each chain entry before
//! it runs. [`abort`] is the handler-fatal path: print the error and exit
//! immediately, bypassing the command chain.

use std::fmt::Display;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Derive verbosity from the environment.
    pub fn from_env() -> Self {
        match std::env::var("FORGEWRAP_DEBUG") {
            Ok(val) if !val.is_empty() && val != "0" => Verbosity::Debug,
            _ => Verbosity::Normal,
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print an error and exit immediately with status 1.
///
/// This is the handler-fatal path for unrecoverable input: nothing queued
/// on the command chain runs.
pub fn abort(message: impl Display) -> ! {
    error(message);
    std::process::exit(1);
}
