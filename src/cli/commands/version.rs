//! cli::commands::version
//!
//! `fw version` - forwards `git version`, then reports its own.

use crate::cli::chain::Args;
use crate::cli::registry::{Command, Handler};

/// Tool version from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handler for `version`.
pub struct Version;

impl Handler for Version {
    fn run(&self, _command: &Command, args: &mut Args) -> anyhow::Result<()> {
        // The forward of `git version` stays as the primary step; our own
        // line is queued behind it so it only prints when git succeeds.
        args.after("echo", [format!("fw version {}", VERSION)]);
        Ok(())
    }
}
