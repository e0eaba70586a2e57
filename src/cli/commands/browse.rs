//! cli::commands::browse
//!
//! `fw browse [-u] [SUBPAGE]` - open the project page in a browser.
//!
//! The forward to git is replaced with the browser-open command (or an
//! `echo` of the URL with `-u`), so the launch participates in the chain
//! like any other step.

use anyhow::Context as _;

use crate::cli::chain::Args;
use crate::cli::registry::{Command, Handler};
use crate::core::Config;
use crate::forge::Project;
use crate::git::Git;

/// Handler for `browse`.
pub struct Browse {
    config: Config,
}

impl Browse {
    pub fn new(config: Config) -> Self {
        Browse { config }
    }

    /// Map the optional subpage positional to a URL path.
    fn url_path(&self, args: &Args, git: &Git) -> anyhow::Result<String> {
        match args.first_param() {
            None => Ok(String::new()),
            Some("commits") => {
                let branch = git
                    .current_branch()
                    .context("cannot browse commits without a current branch")?;
                Ok(format!("/commits/{}", branch))
            }
            Some(subpage) => Ok(format!("/{}", subpage)),
        }
    }
}

impl Handler for Browse {
    fn run(&self, _command: &Command, args: &mut Args) -> anyhow::Result<()> {
        let git = Git::new(self.config.git_program());
        let project = Project::from_repo(&git, &self.config)
            .context("could not determine the project to browse")?;
        let url = project.web_url(&self.url_path(args, &git)?);

        if args.flags().bool_flag("--url") {
            args.replace("echo", [url]);
        } else {
            args.replace(self.config.browser_command(), [url]);
        }
        Ok(())
    }
}
