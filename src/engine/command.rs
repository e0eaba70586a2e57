//! engine::command
//!
//! Process-spawn primitive.
//!
//! # Overview
//!
//! [`Cmd`] wraps one external program name plus its argument vector. It is
//! the only value the execution engine consumes: command handlers build
//! chains of `Cmd`s, and the runner materializes them into real processes.
//!
//! # Rendering
//!
//! `Cmd` implements `Display` with shell-safe quoting, and [`Cmd::parse`]
//! inverts that rendering. The two round-trip:
//!
//! ```
//! use forgewrap::engine::command::Cmd;
//!
//! let cmd = Cmd::new("git").args(["commit", "-m", "hello world"]);
//! assert_eq!(cmd.to_string(), r#"git commit -m "hello world""#);
//!
//! let back = Cmd::parse(&cmd.to_string()).unwrap();
//! assert_eq!(back, cmd);
//! ```
//!
//! # Stdio
//!
//! `run()` inherits the parent's stdin/stdout/stderr verbatim, which is
//! required for interactive children (pagers, editors, password prompts).
//! `output()` captures stdout for metadata queries.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::process::{Command as StdCommand, ExitStatus, Stdio};

use thiserror::Error;

/// Errors from spawning or parsing commands.
#[derive(Debug, Error)]
pub enum CmdError {
    /// The program could not be started.
    #[error("failed to run '{program}': {source}")]
    SpawnFailed {
        /// Program that failed to start
        program: String,
        /// Underlying I/O error
        source: io::Error,
    },

    /// The program ran but exited non-zero.
    #[error("'{program}' exited with status {code}{stderr}")]
    NonZeroExit {
        /// Program that failed
        program: String,
        /// Exit code (or -1 if killed by a signal)
        code: i32,
        /// Captured stderr, prefixed with ": " when non-empty
        stderr: String,
    },

    /// A command line could not be split into words.
    #[error("unterminated quote in command line: {line}")]
    UnterminatedQuote {
        /// The offending line
        line: String,
    },

    /// A command line contained no program name.
    #[error("empty command line")]
    EmptyLine,
}

/// One external program invocation: program name plus argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
}

impl Cmd {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Cmd {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument vector (not including the program name).
    pub fn argv(&self) -> &[String] {
        &self.args
    }

    /// Parse a shell-quoted command line back into a `Cmd`.
    ///
    /// Understands double quotes with backslash escapes and single quotes
    /// with literal contents. Inverts the `Display` rendering.
    ///
    /// # Errors
    ///
    /// Returns [`CmdError::UnterminatedQuote`] if a quote is left open, or
    /// [`CmdError::EmptyLine`] if no program name remains after splitting.
    pub fn parse(line: &str) -> Result<Cmd, CmdError> {
        let words = split_words(line)?;
        let mut iter = words.into_iter();
        let program = iter.next().ok_or(CmdError::EmptyLine)?;
        Ok(Cmd {
            program,
            args: iter.collect(),
        })
    }

    /// Run the command, inheriting stdio, and block until it exits.
    pub fn run(&self) -> io::Result<ExitStatus> {
        self.std_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
    }

    /// Run the command and capture stdout, trimmed of trailing whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CmdError::SpawnFailed`] if the program cannot start, or
    /// [`CmdError::NonZeroExit`] (with captured stderr) on failure status.
    pub fn output(&self) -> Result<String, CmdError> {
        let out = self
            .std_command()
            .stdin(Stdio::inherit())
            .output()
            .map_err(|source| CmdError::SpawnFailed {
                program: self.program.clone(),
                source,
            })?;

        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr).trim_end().to_string();
            return Err(CmdError::NonZeroExit {
                program: self.program.clone(),
                code: out.status.code().unwrap_or(-1),
                stderr: if stderr.is_empty() {
                    String::new()
                } else {
                    format!(": {}", stderr)
                },
            });
        }

        Ok(String::from_utf8_lossy(&out.stdout).trim_end().to_string())
    }

    /// Build the underlying `std::process::Command`.
    pub(crate) fn std_command(&self) -> StdCommand {
        let mut cmd = StdCommand::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Characters that never need quoting in a rendered command line.
fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '-' | '_' | '.' | '/' | ':' | '@' | '+' | ',' | '=' | '%')
}

/// Shell-quote a single word for display.
///
/// Words made of safe characters pass through unchanged. Everything else is
/// wrapped in double quotes with `\`, `"`, `$` and backtick escaped, so the
/// rendering is both shell-pasteable and reversible by [`Cmd::parse`].
pub fn quote(word: &str) -> Cow<'_, str> {
    if !word.is_empty() && word.chars().all(is_safe_char) {
        return Cow::Borrowed(word);
    }

    let mut quoted = String::with_capacity(word.len() + 2);
    quoted.push('"');
    for c in word.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

/// Split a command line into words, honoring quotes and backslashes.
fn split_words(line: &str) -> Result<Vec<String>, CmdError> {
    let mut words = Vec::new();
    let mut current = String::new();
    // in_word distinguishes "" (an empty quoted word) from no word at all.
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(escaped) => current.push(escaped),
                            None => {
                                return Err(CmdError::UnterminatedQuote {
                                    line: line.to_string(),
                                })
                            }
                        },
                        Some(inner) => current.push(inner),
                        None => {
                            return Err(CmdError::UnterminatedQuote {
                                line: line.to_string(),
                            })
                        }
                    }
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(inner) => current.push(inner),
                        None => {
                            return Err(CmdError::UnterminatedQuote {
                                line: line.to_string(),
                            })
                        }
                    }
                }
            }
            '\\' => {
                in_word = true;
                match chars.next() {
                    Some(escaped) => current.push(escaped),
                    None => current.push('\\'),
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod building {
        use super::*;

        #[test]
        fn arg_and_args_accumulate() {
            let cmd = Cmd::new("git").arg("commit").args(["-m", "msg"]);
            assert_eq!(cmd.program(), "git");
            assert_eq!(cmd.argv(), ["commit", "-m", "msg"]);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn plain_words_are_unquoted() {
            let cmd = Cmd::new("git").args(["log", "--oneline", "-n5"]);
            assert_eq!(cmd.to_string(), "git log --oneline -n5");
        }

        #[test]
        fn whitespace_args_are_quoted() {
            let cmd = Cmd::new("git").args(["commit", "-m", "hello world"]);
            assert_eq!(cmd.to_string(), r#"git commit -m "hello world""#);
        }

        #[test]
        fn empty_arg_is_quoted() {
            let cmd = Cmd::new("git").args(["commit", "-m", ""]);
            assert_eq!(cmd.to_string(), r#"git commit -m """#);
        }

        #[test]
        fn shell_specials_are_escaped() {
            let cmd = Cmd::new("echo").arg(r#"a "b" $c"#);
            assert_eq!(cmd.to_string(), r#"echo "a \"b\" \$c""#);
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn splits_plain_words() {
            let cmd = Cmd::parse("git status -sb").unwrap();
            assert_eq!(cmd.program(), "git");
            assert_eq!(cmd.argv(), ["status", "-sb"]);
        }

        #[test]
        fn double_quotes_preserve_spaces() {
            let cmd = Cmd::parse(r#"git commit -m "hello world""#).unwrap();
            assert_eq!(cmd.argv(), ["commit", "-m", "hello world"]);
        }

        #[test]
        fn single_quotes_are_literal() {
            let cmd = Cmd::parse(r#"echo 'a "b" $c'"#).unwrap();
            assert_eq!(cmd.argv(), [r#"a "b" $c"#]);
        }

        #[test]
        fn empty_quoted_word_survives() {
            let cmd = Cmd::parse(r#"git commit -m """#).unwrap();
            assert_eq!(cmd.argv(), ["commit", "-m", ""]);
        }

        #[test]
        fn unterminated_quote_is_an_error() {
            assert!(matches!(
                Cmd::parse(r#"echo "oops"#),
                Err(CmdError::UnterminatedQuote { .. })
            ));
        }

        #[test]
        fn blank_line_is_an_error() {
            assert!(matches!(Cmd::parse("   "), Err(CmdError::EmptyLine)));
        }

        #[test]
        fn round_trips_the_commit_example() {
            let original = Cmd::new("git").args(["commit", "-m", "hello world"]);
            let rendered = original.to_string();
            assert_eq!(rendered, r#"git commit -m "hello world""#);
            assert_eq!(Cmd::parse(&rendered).unwrap(), original);
        }
    }

    mod spawning {
        use super::*;

        #[test]
        fn output_captures_stdout() {
            let out = Cmd::new("echo").arg("hello").output().unwrap();
            assert_eq!(out, "hello");
        }

        #[test]
        fn output_trims_trailing_newline() {
            let out = Cmd::new("printf").arg("abc\\n").output().unwrap();
            assert_eq!(out, "abc");
        }

        #[test]
        fn missing_program_is_spawn_failed() {
            let err = Cmd::new("definitely-not-a-real-program-xyz")
                .output()
                .unwrap_err();
            assert!(matches!(err, CmdError::SpawnFailed { .. }));
        }

        #[test]
        fn failing_program_reports_code() {
            let err = Cmd::new("false").output().unwrap_err();
            match err {
                CmdError::NonZeroExit { code, .. } => assert_eq!(code, 1),
                other => panic!("expected NonZeroExit, got {:?}", other),
            }
        }

        #[test]
        fn run_returns_exit_status() {
            let status = Cmd::new("true").run().unwrap();
            assert!(status.success());
        }
    }
}
