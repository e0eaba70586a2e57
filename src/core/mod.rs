//! core
//!
//! Configuration and shared domain values.

pub mod config;

pub use config::{Config, ConfigError};
