//! forge
//!
//! Remote-hosting project resolution.
//!
//! A [`Project`] is the host/owner/name triple behind a git remote. It is
//! parsed from SSH or HTTPS remote URLs and used by handlers to build web
//! URLs for browse and compare style commands.

use thiserror::Error;

use crate::core::Config;
use crate::git::{Git, GitError};

/// Errors from project resolution.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The remote URL did not look like a forge project.
    #[error("remote url does not point at {host}: {url}")]
    UnrecognizedRemote {
        /// Configured forge host
        host: String,
        /// The offending URL
        url: String,
    },

    /// The underlying git query failed.
    #[error(transparent)]
    Git(#[from] GitError),
}

/// A remote-hosted project: host, owner, and repository name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Forge host, e.g. `github.com`
    pub host: String,
    /// Repository owner
    pub owner: String,
    /// Repository name (without `.git`)
    pub name: String,
}

impl Project {
    /// Parse a project from a remote URL.
    ///
    /// Supports SSH and HTTPS formats:
    /// - `git@github.com:owner/repo.git`
    /// - `ssh://git@github.com/owner/repo.git`
    /// - `https://github.com/owner/repo.git`
    /// - `https://github.com/owner/repo`
    ///
    /// # Example
    ///
    /// ```
    /// use forgewrap::forge::Project;
    ///
    /// let project = Project::from_url("git@github.com:octocat/hello-world.git").unwrap();
    /// assert_eq!(project.owner, "octocat");
    /// assert_eq!(project.name, "hello-world");
    /// ```
    pub fn from_url(url: &str) -> Option<Self> {
        // SSH scp-like form: git@host:owner/repo(.git)
        if let Some(rest) = url.strip_prefix("git@") {
            let (host, path) = rest.split_once(':')?;
            return Self::from_host_path(host, path);
        }

        // URL forms: scheme://[user@]host/owner/repo(.git)
        for scheme in ["https://", "http://", "ssh://", "git://"] {
            if let Some(rest) = url.strip_prefix(scheme) {
                let rest = rest.split_once('@').map_or(rest, |(_, r)| r);
                let (host, path) = rest.split_once('/')?;
                return Self::from_host_path(host, path);
            }
        }

        None
    }

    fn from_host_path(host: &str, path: &str) -> Option<Self> {
        let path = path.strip_suffix(".git").unwrap_or(path);
        let path = path.trim_matches('/');
        let mut segments = path.splitn(2, '/');
        let owner = segments.next()?;
        let name = segments.next()?;
        if host.is_empty() || owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Project {
            host: host.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// Resolve the project behind the repository's preferred remote.
    ///
    /// # Errors
    ///
    /// Fails if there is no usable remote, or the remote URL does not
    /// match the configured forge host.
    pub fn from_repo(git: &Git, config: &Config) -> Result<Self, ForgeError> {
        let remote = git.default_remote()?;
        let url = git.remote_url(&remote)?;
        match Self::from_url(&url) {
            Some(project) if project.host == config.host() => Ok(project),
            _ => Err(ForgeError::UnrecognizedRemote {
                host: config.host().to_string(),
                url,
            }),
        }
    }

    /// The project's web URL, with an optional path appended.
    ///
    /// ```
    /// use forgewrap::forge::Project;
    ///
    /// let project = Project::from_url("https://github.com/octo/demo").unwrap();
    /// assert_eq!(project.web_url(""), "https://github.com/octo/demo");
    /// assert_eq!(project.web_url("/issues"), "https://github.com/octo/demo/issues");
    /// ```
    pub fn web_url(&self, path: &str) -> String {
        format!("https://{}/{}/{}{}", self.host, self.owner, self.name, path)
    }

    /// The HTTPS clone/fetch URL for this project.
    pub fn git_url(&self) -> String {
        format!("https://{}/{}/{}.git", self.host, self.owner, self.name)
    }
}
