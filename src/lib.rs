//! Forgewrap - a CLI front-end that adds remote-hosting features to git.
//!
//! Forgewrap (`fw`) sits in front of the git binary: it tokenizes the raw
//! command line, lets built-in command handlers rewrite arguments and
//! queue extra invocations, and then runs the resulting chain with
//! process-replacement semantics on the final step. Commands it does not
//! recognize forward to git exactly as typed.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - tokenizer/flag parser, command registry, and the `Args`
//!   chain builder handlers mutate
//! - [`engine`] - the `Cmd` process primitive and the sequential chain
//!   runner with terminal process replacement
//! - [`git`] - metadata queries against the wrapped git binary
//! - [`forge`] - project (host/owner/name) resolution from remote URLs
//! - [`core`] - configuration
//! - [`ui`] - output and the fatal-abort helper
//!
//! # Correctness Invariants
//!
//! 1. A token consumed as a flag name or value never reappears as a
//!    positional argument
//! 2. Chain steps run strictly in order; any failure aborts the remainder
//! 3. Only the final chain step may replace the process, so interactive
//!    children keep the terminal
//! 4. The tool's exit code is always the last executed step's exit code

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod git;
pub mod ui;
