//! engine::runner
//!
//! Sequential execution of a materialized command chain.
//!
//! # Lifecycle
//!
//! ```text
//! Idle -> Running(i = 0..n-1) -> Succeeded | Failed(i)
//! ```
//!
//! Every entry except the last is spawned with inherited stdio and blocked
//! on to completion. A non-zero exit or spawn failure stops the chain
//! immediately: no later entry runs. The final entry goes through
//! [`terminal_exec`], so interactive last steps (pagers, editors) own the
//! terminal exactly as if the user had launched them directly.
//!
//! # Invariants
//!
//! - Only the last chain entry is eligible for process replacement.
//! - A failing step's exit code propagates as the whole run's exit code.
//! - An empty chain is a no-op.

use std::io;

use thiserror::Error;

use super::command::Cmd;
use super::exec::terminal_exec;
use crate::ui::output::{self, Verbosity};

/// Errors from running a command chain.
#[derive(Debug, Error)]
pub enum RunError {
    /// A chain entry could not be started.
    #[error("failed to start '{command}': {source}")]
    Spawn {
        /// Rendered command line that failed to start
        command: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A chain entry ran but exited non-zero.
    #[error("'{command}' exited with status {code}")]
    Failed {
        /// Rendered command line that failed
        command: String,
        /// The failing exit code
        code: i32,
    },
}

impl RunError {
    /// The exit code the tool should adopt for this failure.
    ///
    /// Spawn failures use the shell conventions: 127 for a missing program,
    /// 126 for anything else. Execution failures propagate the child's code.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound => 127,
            RunError::Spawn { .. } => 126,
            RunError::Failed { code, .. } => *code,
        }
    }
}

/// Run a chain of commands in order.
///
/// Entries before the last block to completion; the last is handed to
/// [`terminal_exec`]. On unix a successful run therefore never returns.
/// The portable fallback returns `Ok(code)` with the final entry's exit
/// code, which the caller must exit with.
///
/// # Errors
///
/// Returns [`RunError`] as soon as any entry fails to start or exits
/// non-zero; later entries are not run.
pub fn execute(chain: &[Cmd], verbosity: Verbosity) -> Result<i32, RunError> {
    let Some((last, rest)) = chain.split_last() else {
        return Ok(0);
    };

    for cmd in rest {
        output::debug(format!("running: {}", cmd), verbosity);
        let status = cmd.run().map_err(|source| RunError::Spawn {
            command: cmd.to_string(),
            source,
        })?;
        if !status.success() {
            return Err(RunError::Failed {
                command: cmd.to_string(),
                code: status.code().unwrap_or(1),
            });
        }
    }

    output::debug(format!("exec: {}", last), verbosity);
    terminal_exec(last).map_err(|source| RunError::Spawn {
        command: last.to_string(),
        source,
    })
}
