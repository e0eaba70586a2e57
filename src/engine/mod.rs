//! engine
//!
//! Execution engine for command chains.
//!
//! # Responsibilities
//!
//! - [`command`] - the [`Cmd`](command::Cmd) process primitive and its
//!   shell-quoted rendering
//! - [`exec`] - terminal process-replacement capability for the final step
//! - [`runner`] - sequential chain execution with error propagation
//!
//! # Invariants
//!
//! - Chain entries run strictly in order; a failure aborts the remainder
//! - Exactly the last entry may replace the current process
//! - Stdio is shared verbatim between parent and children

pub mod command;
pub mod exec;
pub mod runner;

pub use command::{Cmd, CmdError};
pub use runner::{execute, RunError};
