//! cli::commands
//!
//! The built-in command set, one file per command.
//!
//! Each handler mutates the [`Args`](crate::cli::chain::Args) chain and
//! never runs processes itself. Commands not registered here forward to
//! git verbatim.

mod browse;
mod cherry_pick;
mod compare;
mod help;
mod version;

pub use version::VERSION;

use crate::cli::flags::FlagSpec;
use crate::cli::registry::{Command, Registry};
use crate::core::Config;

/// Build the registry with every built-in command.
pub fn build_registry(config: &Config) -> Registry {
    let commands = vec![
        Command::from_usage("browse [-u] [SUBPAGE]")
            .flag(FlagSpec::boolean("--url").alias("-u"))
            .handler(browse::Browse::new(config.clone())),
        Command::from_usage("compare [-u] [RANGE]")
            .flag(FlagSpec::boolean("--url").alias("-u"))
            .handler(compare::Compare::new(config.clone())),
        Command::from_usage("cherry-pick <COMMIT-URL|SHA>")
            .passthrough()
            .handler(cherry_pick::CherryPick::new(config.clone())),
        Command::from_usage("version")
            .handler(version::Version),
    ];

    // Help needs the usage lines, so collect them before moving commands in.
    let mut usage_lines: Vec<String> = commands
        .iter()
        .map(|cmd| cmd.usage_text().to_string())
        .collect();
    usage_lines.push("help".to_string());
    usage_lines.sort();

    let mut registry = Registry::new();
    for command in commands {
        registry.register(command, &[]);
    }
    registry.register(
        Command::new("help").handler(help::Help::new(usage_lines)),
        &[],
    );
    registry
}
