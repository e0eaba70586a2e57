//! cli::commands::compare
//!
//! `fw compare [-u] [RANGE]` - open the compare view for a branch or
//! range.
//!
//! With no positional the current branch is compared; a positional is
//! taken verbatim, so both `feature` and `main...feature` work.

use crate::cli::chain::Args;
use crate::cli::registry::{Command, Handler};
use crate::core::Config;
use crate::forge::Project;
use crate::git::Git;
use crate::ui;

/// Handler for `compare`.
pub struct Compare {
    config: Config,
}

impl Compare {
    pub fn new(config: Config) -> Self {
        Compare { config }
    }
}

impl Handler for Compare {
    fn run(&self, _command: &Command, args: &mut Args) -> anyhow::Result<()> {
        let git = Git::new(self.config.git_program());
        let project = match Project::from_repo(&git, &self.config) {
            Ok(project) => project,
            // Unrecoverable input: nothing sensible to forward to git.
            Err(err) => ui::abort(err),
        };

        let range = match args.first_param() {
            Some(range) => range.to_string(),
            None => match git.current_branch() {
                Ok(branch) => branch,
                Err(err) => ui::abort(format!("cannot compare: {}", err)),
            },
        };

        let url = project.web_url(&format!("/compare/{}", range));
        if args.flags().bool_flag("--url") {
            args.replace("echo", [url]);
        } else {
            args.replace(self.config.browser_command(), [url]);
        }
        Ok(())
    }
}
