//! cli::registry
//!
//! Command registry and dispatcher.
//!
//! # Architecture
//!
//! The registry is an explicit value built once at startup and passed to
//! the dispatcher - there is no global command table. Each [`Command`]
//! owns its flag spec and an optional subcommand map, and handlers are a
//! closed set of implementations behind the single [`Handler`] capability.
//!
//! # Dispatch
//!
//! - An unregistered command leaves the [`Args`] chain untouched, so the
//!   invocation forwards to git verbatim.
//! - If the first positional names a subcommand, dispatch drops that
//!   token and recurses.
//! - A subcommand-only command with an unrecognized first positional
//!   fails with `unknown subcommand: <name>`.
//! - Non-passthrough commands re-parse the remaining positionals with
//!   their own flag spec before the handler runs, so every command shares
//!   the bundling and terminator rules of [`crate::cli::flags`].

use std::collections::HashMap;

use thiserror::Error;

use super::chain::Args;
use super::flags::{FlagError, FlagParser, FlagSpec};

/// Errors from dispatching an invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// First positional matched no subcommand of a subcommand-only command.
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),

    /// A subcommand-only command was invoked with no subcommand.
    #[error("usage: {0}")]
    MissingSubcommand(String),

    /// The command's own flag parse failed.
    #[error(transparent)]
    Flag(#[from] FlagError),

    /// The handler itself failed.
    #[error(transparent)]
    Handler(#[from] anyhow::Error),
}

/// A command handler.
///
/// Handlers mutate the [`Args`] chain: rewriting positionals, queueing
/// extra invocations, replacing or suppressing the forward to git. They
/// never run processes themselves.
pub trait Handler {
    /// Run the handler against the dispatched command and args.
    fn run(&self, command: &Command, args: &mut Args) -> anyhow::Result<()>;
}

/// A named command with its flag spec and optional subcommands.
pub struct Command {
    name: String,
    usage: String,
    passthrough: bool,
    flags: Vec<FlagSpec>,
    handler: Option<Box<dyn Handler>>,
    subcommands: HashMap<String, Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("passthrough", &self.passthrough)
            .field("subcommands", &self.subcommands.keys())
            .finish_non_exhaustive()
    }
}

impl Command {
    /// Create a command with an explicit name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Command {
            usage: name.clone(),
            name,
            passthrough: false,
            flags: Vec::new(),
            handler: None,
            subcommands: HashMap::new(),
        }
    }

    /// Create a command from usage text; the name is its first word.
    ///
    /// # Panics
    ///
    /// Panics if the usage text is empty. Usage strings are compiled-in
    /// literals, so this is a programming error.
    pub fn from_usage(usage: impl Into<String>) -> Self {
        let usage = usage.into();
        let name = usage
            .split_whitespace()
            .next()
            .expect("usage text must start with the command name")
            .to_string();
        Command {
            name,
            usage,
            passthrough: false,
            flags: Vec::new(),
            handler: None,
            subcommands: HashMap::new(),
        }
    }

    /// Replace the usage text.
    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Mark as passthrough: the handler (if any) sees raw tokens and no
    /// flag parsing is performed, so unknown git flags survive untouched.
    pub fn passthrough(mut self) -> Self {
        self.passthrough = true;
        self
    }

    /// Register a flag spec on this command.
    pub fn flag(mut self, spec: FlagSpec) -> Self {
        self.flags.push(spec);
        self
    }

    /// Attach the handler.
    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Add a subcommand. Names must be unique.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate subcommand name; the command tree is built
    /// from compiled-in definitions.
    pub fn subcommand(mut self, sub: Command) -> Self {
        let previous = self.subcommands.insert(sub.name.clone(), sub);
        assert!(previous.is_none(), "duplicate subcommand name");
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The usage text.
    pub fn usage_text(&self) -> &str {
        &self.usage
    }

    /// Build a fresh parser from this command's flag specs.
    fn flag_parser(&self) -> FlagParser {
        let mut parser = FlagParser::new();
        for spec in &self.flags {
            parser.register(spec.clone());
        }
        parser
    }

    /// Run this command against `args` (after dispatch resolved it).
    fn call(&self, args: &mut Args) -> Result<(), DispatchError> {
        if !self.subcommands.is_empty() {
            match args.first_param().map(str::to_string) {
                Some(first) => {
                    if let Some(sub) = self.subcommands.get(&first) {
                        args.remove_param(0);
                        args.set_command(sub.name.clone());
                        return sub.call(args);
                    }
                    if self.handler.is_none() {
                        return Err(DispatchError::UnknownSubcommand(first));
                    }
                }
                None => {
                    if self.handler.is_none() {
                        return Err(DispatchError::MissingSubcommand(self.usage.clone()));
                    }
                }
            }
        }

        let Some(handler) = &self.handler else {
            // Passthrough without a handler: forward verbatim.
            return Ok(());
        };

        if !self.passthrough {
            let mut parser = self.flag_parser();
            let result = parser.parse(args.params());
            if let Some(err) = result.error {
                return Err(err.into());
            }
            let positionals = result
                .positionals
                .iter()
                .map(|&i| args.params()[i].clone())
                .collect();
            args.set_params(positionals);
            args.set_flags(parser);
        }

        handler.run(self, args)?;
        Ok(())
    }
}

/// The command registry: name -> command, plus aliases.
#[derive(Debug, Default)]
pub struct Registry {
    commands: HashMap<String, Command>,
    aliases: HashMap<String, String>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a command under its name and any aliases.
    pub fn register(&mut self, command: Command, aliases: &[&str]) {
        for alias in aliases {
            self.aliases
                .insert((*alias).to_string(), command.name.clone());
        }
        self.commands.insert(command.name.clone(), command);
    }

    /// Look up a command by name or alias.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        match self.commands.get(name) {
            Some(cmd) => Some(cmd),
            None => self
                .aliases
                .get(name)
                .and_then(|target| self.commands.get(target)),
        }
    }

    /// Usage lines for every registered command, sorted by name.
    pub fn usage_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .commands
            .values()
            .map(|cmd| cmd.usage.clone())
            .collect();
        lines.sort();
        lines
    }

    /// Dispatch an invocation.
    ///
    /// Unregistered commands are left alone: the default chain forwards
    /// them to git verbatim.
    pub fn dispatch(&self, args: &mut Args) -> Result<(), DispatchError> {
        match self.lookup(args.command()) {
            Some(command) => {
                // Aliased invocations run under the canonical name.
                args.set_command(command.name.clone());
                command.call(args)
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Test handler that records whether it ran and the params it saw.
    struct Recorder {
        ran: Rc<Cell<bool>>,
        expect_params: Vec<String>,
        suppress: bool,
    }

    impl Handler for Recorder {
        fn run(&self, _command: &Command, args: &mut Args) -> anyhow::Result<()> {
            self.ran.set(true);
            assert_eq!(args.params(), self.expect_params.as_slice());
            if self.suppress {
                args.no_forward();
            }
            Ok(())
        }
    }

    fn recorder(expect: &[&str], suppress: bool) -> (Recorder, Rc<Cell<bool>>) {
        let ran = Rc::new(Cell::new(false));
        let handler = Recorder {
            ran: Rc::clone(&ran),
            expect_params: expect.iter().map(|p| p.to_string()).collect(),
            suppress,
        };
        (handler, ran)
    }

    fn invocation(command: &str, params: &[&str]) -> Args {
        Args::new("git", command, params.iter().map(|p| p.to_string()).collect())
    }

    mod lookup {
        use super::*;

        #[test]
        fn finds_by_name_and_alias() {
            let mut registry = Registry::new();
            registry.register(Command::new("pull-request"), &["pr"]);
            assert!(registry.lookup("pull-request").is_some());
            assert_eq!(registry.lookup("pr").unwrap().name(), "pull-request");
            assert!(registry.lookup("nope").is_none());
        }

        #[test]
        fn name_derives_from_usage_text() {
            let cmd = Command::from_usage("browse [-u] [SUBPAGE]");
            assert_eq!(cmd.name(), "browse");
        }
    }

    mod dispatch {
        use super::*;

        #[test]
        fn unregistered_command_forwards_untouched() {
            let registry = Registry::new();
            let mut args = invocation("status", &["-sb"]);
            registry.dispatch(&mut args).unwrap();
            let chain = args.commands();
            assert_eq!(chain.len(), 1);
            assert_eq!(chain[0].argv(), ["status", "-sb"]);
        }

        #[test]
        fn subcommand_wins_over_parent_handler() {
            let (parent, parent_ran) = recorder(&[], false);
            let (sub, sub_ran) = recorder(&["v1"], true);

            let mut registry = Registry::new();
            registry.register(
                Command::new("push")
                    .handler(parent)
                    .subcommand(Command::new("release").handler(sub)),
                &[],
            );

            let mut args = invocation("push", &["release", "v1"]);
            registry.dispatch(&mut args).unwrap();

            assert!(sub_ran.get());
            assert!(!parent_ran.get(), "parent handler must not run");
            assert_eq!(args.command(), "release");
            assert!(args.commands().is_empty());
        }

        #[test]
        fn parent_handler_runs_when_no_subcommand_matches() {
            let (parent, parent_ran) = recorder(&["v1"], false);

            let mut registry = Registry::new();
            registry.register(
                Command::new("push")
                    .handler(parent)
                    .subcommand(Command::new("release")),
                &[],
            );

            let mut args = invocation("push", &["v1"]);
            registry.dispatch(&mut args).unwrap();
            assert!(parent_ran.get());
        }

        #[test]
        fn subcommand_only_command_rejects_unknown_name() {
            let mut registry = Registry::new();
            registry.register(
                Command::new("release").subcommand(Command::new("create")),
                &[],
            );

            let mut args = invocation("release", &["destroy"]);
            let err = registry.dispatch(&mut args).unwrap_err();
            assert_eq!(err.to_string(), "unknown subcommand: destroy");
        }

        #[test]
        fn subcommand_only_command_requires_a_subcommand() {
            let mut registry = Registry::new();
            registry.register(
                Command::from_usage("release <create|delete>")
                    .subcommand(Command::new("create")),
                &[],
            );

            let mut args = invocation("release", &[]);
            let err = registry.dispatch(&mut args).unwrap_err();
            assert!(matches!(err, DispatchError::MissingSubcommand(_)));
        }

        #[test]
        fn alias_dispatches_under_canonical_name() {
            let (handler, ran) = recorder(&[], true);
            let mut registry = Registry::new();
            registry.register(Command::new("pull-request").handler(handler), &["pr"]);

            let mut args = invocation("pr", &[]);
            registry.dispatch(&mut args).unwrap();
            assert!(ran.get());
            assert_eq!(args.command(), "pull-request");
        }
    }

    mod flag_reparse {
        use super::*;

        /// Handler asserting the dispatch-time flag parse results.
        struct FlagChecker;

        impl Handler for FlagChecker {
            fn run(&self, _command: &Command, args: &mut Args) -> anyhow::Result<()> {
                assert!(args.flags().bool_flag("--url"));
                assert_eq!(args.params(), ["issues"]);
                args.no_forward();
                Ok(())
            }
        }

        #[test]
        fn command_flags_are_parsed_before_the_handler() {
            let mut registry = Registry::new();
            registry.register(
                Command::new("browse")
                    .flag(FlagSpec::boolean("--url").alias("-u"))
                    .handler(FlagChecker),
                &[],
            );

            let mut args = invocation("browse", &["-u", "issues"]);
            registry.dispatch(&mut args).unwrap();
        }

        #[test]
        fn flag_errors_surface_before_the_handler() {
            let (handler, ran) = recorder(&[], false);
            let mut registry = Registry::new();
            registry.register(Command::new("browse").handler(handler), &[]);

            let mut args = invocation("browse", &["--nonexist", "one"]);
            let err = registry.dispatch(&mut args).unwrap_err();
            assert_eq!(err.to_string(), "unknown flag: '--nonexist'");
            assert!(!ran.get());
        }

        #[test]
        fn passthrough_commands_skip_flag_parsing() {
            let (handler, ran) = recorder(&["--whatever", "-x"], false);
            let mut registry = Registry::new();
            registry.register(
                Command::new("cherry-pick").passthrough().handler(handler),
                &[],
            );

            let mut args = invocation("cherry-pick", &["--whatever", "-x"]);
            registry.dispatch(&mut args).unwrap();
            assert!(ran.get());
        }
    }
}
