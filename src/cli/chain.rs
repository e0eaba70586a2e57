//! cli::chain
//!
//! The `Args` chain builder: mutable invocation state handed to command
//! handlers.
//!
//! # Overview
//!
//! One `Args` is created per process invocation. It carries the resolved
//! command name, the positional arguments (which handlers may rewrite),
//! the parsed flag state, and three ordered queues of external
//! invocations:
//!
//! - **before** - runs ahead of the primary step; any failure aborts
//! - **primary** - defaults to forwarding `git <command> <params...>`
//!   verbatim; may be replaced or suppressed
//! - **after** - runs only if the primary step succeeds
//!
//! [`Args::commands`] is a pure projection of the whole chain into
//! [`Cmd`] values, so tests can assert exactly what *would* run without
//! executing anything.

use crate::cli::flags::FlagParser;
use crate::engine::Cmd;

/// Mutable invocation state: positionals, flags, and the command chain.
#[derive(Debug, Default)]
pub struct Args {
    /// Program the default primary step forwards to (normally `git`).
    executable: String,
    command: String,
    params: Vec<String>,
    flags: FlagParser,
    forward_suppressed: bool,
    before: Vec<Cmd>,
    primary: Option<Cmd>,
    after: Vec<Cmd>,
}

impl Args {
    /// Create args for one invocation.
    pub fn new(
        executable: impl Into<String>,
        command: impl Into<String>,
        params: Vec<String>,
    ) -> Self {
        Args {
            executable: executable.into(),
            command: command.into(),
            params,
            ..Args::default()
        }
    }

    /// The resolved command name.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Rename the command (used when dispatch descends into a subcommand).
    pub(crate) fn set_command(&mut self, command: impl Into<String>) {
        self.command = command.into();
    }

    /// The current positional arguments.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Replace the positional list wholesale (after a dispatch re-parse).
    pub(crate) fn set_params(&mut self, params: Vec<String>) {
        self.params = params;
    }

    /// The flag state parsed by the owning command's spec.
    pub fn flags(&self) -> &FlagParser {
        &self.flags
    }

    pub(crate) fn set_flags(&mut self, flags: FlagParser) {
        self.flags = flags;
    }

    // ------------------------------------------------------------------
    // Positional mutation
    // ------------------------------------------------------------------

    /// Remove and return the positional at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds, like `Vec::remove`.
    pub fn remove_param(&mut self, index: usize) -> String {
        self.params.remove(index)
    }

    /// Insert a positional at `index`.
    pub fn insert_param(&mut self, index: usize, value: impl Into<String>) {
        self.params.insert(index, value.into());
    }

    /// Overwrite the positional at `index`.
    pub fn replace_param(&mut self, index: usize, value: impl Into<String>) {
        self.params[index] = value.into();
    }

    /// Append positionals at the end.
    pub fn append_params<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(values.into_iter().map(Into::into));
    }

    /// First positional, if any.
    pub fn first_param(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }

    /// Last positional, if any.
    pub fn last_param(&self) -> Option<&str> {
        self.params.last().map(String::as_str)
    }

    /// Number of positionals.
    pub fn params_len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no positionals.
    pub fn is_params_empty(&self) -> bool {
        self.params.is_empty()
    }

    // ------------------------------------------------------------------
    // Chain construction
    // ------------------------------------------------------------------

    /// Suppress the implicit "forward verbatim" primary step.
    ///
    /// Does not affect an explicit [`replace`](Args::replace).
    pub fn no_forward(&mut self) {
        self.forward_suppressed = true;
    }

    /// Overwrite the primary step with an arbitrary program.
    pub fn replace<I, S>(&mut self, program: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary = Some(Cmd::new(program).args(args));
    }

    /// Queue an invocation to run before the primary step.
    pub fn before<I, S>(&mut self, program: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.before.push(Cmd::new(program).args(args));
    }

    /// Queue an invocation to run after the primary step succeeds.
    pub fn after<I, S>(&mut self, program: impl Into<String>, args: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.after.push(Cmd::new(program).args(args));
    }

    /// The primary step as it currently stands.
    ///
    /// An explicit replacement wins; otherwise this is the default forward
    /// of the (post-mutation) command name and positionals.
    pub fn to_cmd(&self) -> Cmd {
        match &self.primary {
            Some(cmd) => cmd.clone(),
            None => Cmd::new(&self.executable)
                .arg(&self.command)
                .args(self.params.iter().cloned()),
        }
    }

    /// Project the full chain: before..., primary (unless suppressed),
    /// after... Pure; does not execute anything.
    pub fn commands(&self) -> Vec<Cmd> {
        let mut chain = self.before.clone();
        if self.primary.is_some() || !self.forward_suppressed {
            chain.push(self.to_cmd());
        }
        chain.extend(self.after.iter().cloned());
        chain
    }
}
