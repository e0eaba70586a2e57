//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Tokenize raw arguments and recognize flags ([`flags`])
//! - Resolve the invoked command ([`registry`])
//! - Let the handler mutate the invocation chain ([`chain`])
//! - Hand the finished chain to [`crate::engine`] for execution
//!
//! The CLI layer never spawns processes itself; every externally visible
//! side effect goes through the execution engine.

pub mod chain;
pub mod commands;
pub mod flags;
pub mod registry;

pub use chain::Args;
pub use registry::{Command, Handler, Registry};

use crate::core::Config;
use crate::engine;
use crate::ui::output::{self, Verbosity};

/// Run the tool against the process arguments, returning the exit code.
///
/// This is the entry point called from `main`. On unix a successful run
/// usually does not return at all: the final chain step replaces the
/// process.
pub fn run() -> i32 {
    let tokens: Vec<String> = std::env::args().skip(1).collect();
    run_tokens(tokens)
}

/// Run the tool against an explicit token list.
pub fn run_tokens(mut tokens: Vec<String>) -> i32 {
    let verbosity = Verbosity::from_env();

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            output::warn(err, verbosity);
            Config::default()
        }
    };

    // Program-level flags are spellings of built-in commands.
    let command = if tokens.is_empty() {
        "help".to_string()
    } else {
        match tokens[0].as_str() {
            "--help" | "-h" => {
                tokens.remove(0);
                "help".to_string()
            }
            "--version" => {
                tokens.remove(0);
                "version".to_string()
            }
            _ => tokens.remove(0),
        }
    };

    let mut args = Args::new(config.git_program(), command, tokens);
    let registry = commands::build_registry(&config);

    if let Err(err) = registry.dispatch(&mut args) {
        output::error(err);
        return 1;
    }

    match engine::execute(&args.commands(), verbosity) {
        Ok(code) => code,
        Err(err) => {
            output::error(&err);
            err.exit_code()
        }
    }
}
