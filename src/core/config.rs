//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order; the first existing file wins:
//!
//! 1. `$FORGEWRAP_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/forgewrap/config.toml`
//! 3. `~/.forgewrap/config.toml`
//!
//! A missing file is not an error: defaults apply.
//!
//! # Example
//!
//! ```toml
//! host = "github.example.com"
//! git = "/usr/local/bin/git"
//! browser = "firefox"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default forge host when none is configured.
pub const DEFAULT_HOST: &str = "github.com";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The config file exists but is not valid TOML.
    #[error("failed to parse config file '{path}': {message}")]
    Parse {
        /// Path that failed
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },
}

/// User configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Forge host for project URLs (default: `github.com`)
    pub host: Option<String>,

    /// Path to the wrapped git executable (default: `git` on `$PATH`)
    pub git: Option<String>,

    /// Browser command for `browse`-style commands
    pub browser: Option<String>,
}

impl Config {
    /// Load configuration from the standard search path.
    ///
    /// # Errors
    ///
    /// Only an unreadable or unparseable existing file is an error; a
    /// missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// First config path in the search order, regardless of existence.
    fn find_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var("FORGEWRAP_CONFIG") {
            if !explicit.is_empty() {
                return Some(PathBuf::from(explicit));
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let xdg = config_dir.join("forgewrap").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        dirs::home_dir().map(|home| home.join(".forgewrap").join("config.toml"))
    }

    /// The forge host.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// The git program to forward to. `FORGEWRAP_GIT` overrides the
    /// config value; the fallback is `git` on `$PATH`.
    pub fn git_program(&self) -> String {
        if let Ok(program) = std::env::var("FORGEWRAP_GIT") {
            if !program.is_empty() {
                return program;
            }
        }
        self.git.clone().unwrap_or_else(|| "git".to_string())
    }

    /// The browser-open command. `BROWSER` overrides the config value;
    /// the fallback is the platform opener.
    pub fn browser_command(&self) -> String {
        if let Ok(browser) = std::env::var("BROWSER") {
            if !browser.is_empty() {
                return browser;
            }
        }
        self.browser
            .clone()
            .unwrap_or_else(|| default_browser().to_string())
    }
}

#[cfg(target_os = "macos")]
fn default_browser() -> &'static str {
    "open"
}

#[cfg(target_os = "windows")]
fn default_browser() -> &'static str {
    "explorer"
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn default_browser() -> &'static str {
    "xdg-open"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_apply_without_a_file() {
        let config = Config::default();
        assert_eq!(config.host(), DEFAULT_HOST);
        assert!(config.git.is_none());
    }

    #[test]
    fn parses_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "host = \"github.example.com\"\ngit = \"/opt/git\"\nbrowser = \"firefox\""
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.host(), "github.example.com");
        assert_eq!(config.git.as_deref(), Some("/opt/git"));
        assert_eq!(config.browser.as_deref(), Some("firefox"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "hots = \"typo\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "host = [broken\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
