//! git
//!
//! Single interface for git metadata queries.
//!
//! All repository reads flow through [`Git`], which shells out to the
//! wrapped git binary. No other module spawns git for metadata directly.

mod interface;

pub use interface::{Git, GitError};
