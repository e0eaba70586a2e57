//! cli::flags
//!
//! Tokenizer and flag parser for raw command-line tokens.
//!
//! # Grammar
//!
//! The parser walks the token list left to right and implements the
//! POSIX-like grammar git users expect:
//!
//! - a lone `-` is positional
//! - `--` terminates flag parsing; everything after is positional
//! - `--name value` and `--name=value` are equivalent
//! - short flags bundle: `-abc` walks `-a`, `-b`, `-c` via the alias table
//! - a value-expecting short flag consumes the bundle remainder if
//!   non-empty, else the next whole token
//! - a boolean short flag followed by an unregistered remainder records the
//!   remainder as its value (`-dfalse` turns `-d` off)
//! - flags repeat; every received value is kept in order
//!
//! # Errors
//!
//! Only the **first** parse error is retained, but scanning continues so
//! positional recovery is best-effort. Each `parse` call fully resets
//! parser state, so one parser can be reused across invocations.

use std::collections::HashMap;

use thiserror::Error;

/// Errors from flag parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlagError {
    /// A token looked like a flag but matched no registered spec.
    #[error("unknown flag: '{0}'")]
    Unknown(String),

    /// A value-expecting flag had no token left to consume.
    #[error("no value given for '{0}'")]
    MissingValue(String),
}

/// A registered flag: canonical name, value arity, and aliases.
///
/// Names carry their dashes (`--message`, `-m`), matching how they appear
/// on the command line.
#[derive(Debug, Clone)]
pub struct FlagSpec {
    name: String,
    takes_value: bool,
    aliases: Vec<String>,
}

impl FlagSpec {
    /// A flag that takes no value (`--draft`).
    pub fn boolean(name: impl Into<String>) -> Self {
        FlagSpec {
            name: name.into(),
            takes_value: false,
            aliases: Vec::new(),
        }
    }

    /// A flag that expects a value (`--message <msg>`).
    pub fn value(name: impl Into<String>) -> Self {
        FlagSpec {
            name: name.into(),
            takes_value: true,
            aliases: Vec::new(),
        }
    }

    /// Add an alias (typically the short form).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// The canonical name, dashes included.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Result of one `parse` call.
///
/// `positionals` holds the token-stream indices that were not consumed as
/// flag names or values, in original order. `error` is the first parse
/// error, if any; positionals are still populated on error so callers can
/// recover.
#[derive(Debug)]
pub struct ParseResult {
    /// Indices of positional tokens, in original order.
    pub positionals: Vec<usize>,
    /// First error encountered, if any.
    pub error: Option<FlagError>,
}

impl ParseResult {
    /// Convert to a `Result`, discarding positional recovery.
    pub fn into_result(self) -> Result<Vec<usize>, FlagError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.positionals),
        }
    }
}

/// Flag parser with registered specs and per-flag received values.
#[derive(Debug, Default)]
pub struct FlagParser {
    specs: Vec<FlagSpec>,
    // Maps every name and alias to its spec index.
    index: HashMap<String, usize>,
    // Received values, parallel to `specs`. Append-only within a parse.
    values: Vec<Vec<String>>,
    terminated: bool,
    error: Option<FlagError>,
}

impl FlagParser {
    /// Create an empty parser.
    pub fn new() -> Self {
        FlagParser::default()
    }

    /// Register a flag spec. All registration happens before parsing.
    pub fn register(&mut self, spec: FlagSpec) -> &mut Self {
        let idx = self.specs.len();
        self.index.insert(spec.name.clone(), idx);
        for alias in &spec.aliases {
            self.index.insert(alias.clone(), idx);
        }
        self.values.push(Vec::new());
        self.specs.push(spec);
        self
    }

    /// Parse a token list.
    ///
    /// Resets all state from any previous parse, classifies every token,
    /// and returns the positional indices plus the first error (if any).
    pub fn parse(&mut self, tokens: &[String]) -> ParseResult {
        self.reset();

        let mut positionals = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];

            if self.terminated || token == "-" || !token.starts_with('-') {
                // Covers empty tokens too: they are positional.
                positionals.push(i);
            } else if token == "--" {
                self.terminated = true;
            } else if let Some(rest) = token.strip_prefix("--") {
                i += self.parse_long(rest, &tokens[i + 1..]);
            } else {
                i += self.parse_bundle(&token[1..], &tokens[i + 1..]);
            }

            i += 1;
        }

        ParseResult {
            positionals,
            error: self.error.clone(),
        }
    }

    /// Last received value for a flag (by name or alias).
    pub fn value(&self, name: &str) -> Option<&str> {
        self.received(name)
            .and_then(|vals| vals.last().map(String::as_str))
    }

    /// Every received value for a flag, in order.
    pub fn all_values(&self, name: &str) -> &[String] {
        self.received(name).map_or(&[], Vec::as_slice)
    }

    /// Whether a flag received at least one value.
    pub fn has_received(&self, name: &str) -> bool {
        self.received(name).is_some_and(|vals| !vals.is_empty())
    }

    /// Boolean reading of a flag: received at least once and the last
    /// value is not literally `"false"`.
    pub fn bool_flag(&self, name: &str) -> bool {
        self.value(name).is_some_and(|last| last != "false")
    }

    fn received(&self, name: &str) -> Option<&Vec<String>> {
        self.index.get(name).map(|&idx| &self.values[idx])
    }

    fn reset(&mut self) {
        for vals in &mut self.values {
            vals.clear();
        }
        self.terminated = false;
        self.error = None;
    }

    /// Record an error; only the first one per parse is retained.
    fn record_error(&mut self, err: FlagError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Parse a `--name` / `--name=value` token. `rest` is the token after
    /// the dashes; `remaining` is the tokens after this one. Returns how
    /// many extra tokens were consumed (0 or 1).
    fn parse_long(&mut self, rest: &str, remaining: &[String]) -> usize {
        let (name, inline) = match rest.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (rest, None),
        };
        let key = format!("--{}", name);

        let Some(&idx) = self.index.get(&key) else {
            self.record_error(FlagError::Unknown(key));
            return 0;
        };

        if let Some(value) = inline {
            // Inline values are recorded verbatim, including "".
            self.values[idx].push(value.to_string());
            return 0;
        }

        if self.specs[idx].takes_value {
            match remaining.first() {
                Some(next) => {
                    self.values[idx].push(next.clone());
                    return 1;
                }
                None => {
                    let name = self.specs[idx].name.clone();
                    self.record_error(FlagError::MissingValue(name));
                    return 0;
                }
            }
        }

        self.values[idx].push("true".to_string());
        0
    }

    /// Walk a short-flag bundle (`-xyz` minus the dash). Returns how many
    /// extra tokens were consumed (0 or 1).
    fn parse_bundle(&mut self, bundle: &str, remaining: &[String]) -> usize {
        let chars: Vec<char> = bundle.chars().collect();
        let mut j = 0;

        while j < chars.len() {
            let key = format!("-{}", chars[j]);
            let Some(&idx) = self.index.get(&key) else {
                self.record_error(FlagError::Unknown(key));
                return 0;
            };
            let rest: String = chars[j + 1..].iter().collect();

            if self.specs[idx].takes_value {
                if !rest.is_empty() {
                    self.values[idx].push(rest);
                    return 0;
                }
                match remaining.first() {
                    Some(next) => {
                        self.values[idx].push(next.clone());
                        return 1;
                    }
                    None => {
                        let name = self.specs[idx].name.clone();
                        self.record_error(FlagError::MissingValue(name));
                        return 0;
                    }
                }
            }

            // Boolean flag. A remainder that doesn't continue the bundle
            // becomes this flag's value, so `-dfalse` reads as -d=false.
            if !rest.is_empty() {
                let next_key = format!("-{}", chars[j + 1]);
                if !self.index.contains_key(&next_key) {
                    self.values[idx].push(rest);
                    return 0;
                }
            }

            self.values[idx].push("true".to_string());
            j += 1;
        }

        0
    }
}
