//! cli::commands::help
//!
//! `fw help` - prints the command summary without touching git.

use crate::cli::chain::Args;
use crate::cli::registry::{Command, Handler};

/// Handler for `help`. Carries the usage lines captured at registry
/// construction time, so it needs no back-reference to the registry.
pub struct Help {
    usage_lines: Vec<String>,
}

impl Help {
    /// Create the handler with the registry's usage lines.
    pub fn new(usage_lines: Vec<String>) -> Self {
        Help { usage_lines }
    }
}

impl Handler for Help {
    fn run(&self, _command: &Command, args: &mut Args) -> anyhow::Result<()> {
        args.no_forward();
        println!("usage: fw <command> [flags] [args...]");
        println!();
        println!("Commands that add forge features on top of git:");
        for line in &self.usage_lines {
            println!("  {}", line);
        }
        println!();
        println!("Every other command is forwarded to git unchanged.");
        Ok(())
    }
}
