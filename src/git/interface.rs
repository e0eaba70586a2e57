//! git::interface
//!
//! Git metadata queries via the wrapped git binary.
//!
//! # Architecture
//!
//! This module is the single doorway for reading repository state. Because
//! the whole tool forwards invocations to the git *executable*, metadata
//! queries go through the same [`Cmd`] primitive rather than a library
//! binding - the wrapped binary's view of the repository is authoritative.
//!
//! # Example
//!
//! ```ignore
//! use forgewrap::git::Git;
//!
//! let git = Git::new("git");
//! let branch = git.current_branch()?;
//! let url = git.remote_url("origin")?;
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::engine::{Cmd, CmdError};

/// Errors from git metadata queries.
#[derive(Debug, Error)]
pub enum GitError {
    /// HEAD is detached or the repository has no commits.
    #[error("not on any branch")]
    NoCurrentBranch,

    /// The repository has no remotes configured.
    #[error("no git remotes configured")]
    NoRemote,

    /// The named remote does not exist.
    #[error("remote not found: {0}")]
    RemoteNotFound(String),

    /// The underlying git invocation failed.
    #[error(transparent)]
    Command(#[from] CmdError),
}

/// Read-only interface to the wrapped git binary.
#[derive(Debug, Clone)]
pub struct Git {
    program: String,
    /// Repository directory; queries run in the process cwd when unset.
    dir: Option<PathBuf>,
}

impl Git {
    /// Create an interface that shells out to `program` in the current
    /// directory.
    pub fn new(program: impl Into<String>) -> Self {
        Git {
            program: program.into(),
            dir: None,
        }
    }

    /// Create an interface pinned to a repository directory (`git -C`).
    pub fn in_dir(program: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Git {
            program: program.into(),
            dir: Some(dir.into()),
        }
    }

    /// The wrapped git program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The current branch name, from `symbolic-ref --short HEAD`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::NoCurrentBranch`] on detached HEAD.
    pub fn current_branch(&self) -> Result<String, GitError> {
        match self.query(&["symbolic-ref", "--short", "-q", "HEAD"]) {
            Ok(branch) if !branch.is_empty() => Ok(branch),
            Ok(_) => Err(GitError::NoCurrentBranch),
            Err(CmdError::NonZeroExit { .. }) => Err(GitError::NoCurrentBranch),
            Err(err) => Err(err.into()),
        }
    }

    /// The commit id of HEAD.
    pub fn head_commit(&self) -> Result<String, GitError> {
        Ok(self.query(&["rev-parse", "HEAD"])?)
    }

    /// The URL of a named remote.
    pub fn remote_url(&self, name: &str) -> Result<String, GitError> {
        match self.query(&["remote", "get-url", name]) {
            Ok(url) => Ok(url),
            Err(CmdError::NonZeroExit { .. }) => Err(GitError::RemoteNotFound(name.to_string())),
            Err(err) => Err(err.into()),
        }
    }

    /// The preferred remote: `origin` when present, else the first listed.
    pub fn default_remote(&self) -> Result<String, GitError> {
        let listing = self.query(&["remote"])?;
        let mut remotes = listing.lines().map(str::trim).filter(|l| !l.is_empty());
        let first = remotes.next().ok_or(GitError::NoRemote)?.to_string();
        if listing.lines().any(|l| l.trim() == "origin") {
            Ok("origin".to_string())
        } else {
            Ok(first)
        }
    }

    fn query(&self, args: &[&str]) -> Result<String, CmdError> {
        let mut cmd = Cmd::new(&self.program);
        if let Some(dir) = &self.dir {
            cmd = cmd.args(["-C", &dir.display().to_string()]);
        }
        cmd.args(args.iter().copied()).output()
    }
}
