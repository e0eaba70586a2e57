//! engine::exec
//!
//! Terminal process-replacement capability.
//!
//! The last step of a command chain must behave exactly as if the user had
//! typed it: same process id, same signal delivery, same controlling
//! terminal. On POSIX platforms [`terminal_exec`] uses the exec family, so
//! pagers and editors launched by git keep working. Elsewhere it falls back
//! to spawning normally and reporting the child's exit code for the parent
//! to adopt — externally indistinguishable except for pid continuity.

use std::io;

use super::command::Cmd;

/// Replace the current process with `cmd`, or emulate that.
///
/// On unix this only returns on failure: a successful exec never comes
/// back. On other platforms it blocks on the child and returns
/// `Ok(exit_code)`, which the caller must adopt as its own exit code.
///
/// # Errors
///
/// Returns the spawn error if the program cannot be started.
#[cfg(unix)]
pub fn terminal_exec(cmd: &Cmd) -> io::Result<i32> {
    use std::os::unix::process::CommandExt;

    // exec only returns on failure.
    Err(cmd.std_command().exec())
}

/// Replace the current process with `cmd`, or emulate that.
///
/// Portable fallback: spawn, block, and hand the child's exit code back for
/// the parent to exit with.
#[cfg(not(unix))]
pub fn terminal_exec(cmd: &Cmd) -> io::Result<i32> {
    let status = cmd.run()?;
    Ok(status.code().unwrap_or(1))
}
