//! cli::commands::cherry_pick
//!
//! `fw cherry-pick <commit-url>` - cherry-pick straight from a forge
//! commit URL.
//!
//! A positional like `https://github.com/owner/repo/commit/<sha>` is
//! rewritten to the bare sha, and a `git fetch` of that project is queued
//! on the before queue so the object exists locally. Invocations without
//! a commit URL forward to git untouched; this command is passthrough, so
//! git's own cherry-pick flags survive verbatim.

use crate::cli::chain::Args;
use crate::cli::registry::{Command, Handler};
use crate::core::Config;
use crate::forge::Project;

/// Handler for `cherry-pick`.
pub struct CherryPick {
    config: Config,
}

impl CherryPick {
    pub fn new(config: Config) -> Self {
        CherryPick { config }
    }
}

/// Split a forge commit URL into its project and sha.
fn parse_commit_url(url: &str) -> Option<(Project, String)> {
    let (repo_part, sha) = url.split_once("/commit/")?;
    let sha = sha.split(['?', '#']).next().unwrap_or(sha);
    if sha.is_empty() || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let project = Project::from_url(repo_part)?;
    Some((project, sha.to_string()))
}

impl Handler for CherryPick {
    fn run(&self, _command: &Command, args: &mut Args) -> anyhow::Result<()> {
        // Passthrough params: find the first commit-URL positional, if any.
        let found = args.params().iter().enumerate().find_map(|(i, param)| {
            parse_commit_url(param).map(|(project, sha)| (i, project, sha))
        });

        if let Some((index, project, sha)) = found {
            if project.host == self.config.host() {
                args.replace_param(index, sha);
                args.before(
                    self.config.git_program(),
                    ["fetch".to_string(), project.git_url()],
                );
            }
        }
        Ok(())
    }
}
