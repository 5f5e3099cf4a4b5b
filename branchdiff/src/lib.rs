//! Branch diff reporting.
//!
//! Compares the current git branch with a target branch (`main` by default)
//! and reports per-file added/removed line counts. The crate keeps the same
//! split throughout:
//!
//! - **[`core`]**: Pure logic (diff parsing, report model, text rendering).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (git, child processes, config,
//!   report files, terminal prompts).
//!
//! Orchestration modules ([`summary`], [`analyze`]) combine the two to
//! implement the `branchdiff` subcommands; the `launcher` crate reuses the
//! [`io`] layer for its precondition checks.

pub mod analyze;
pub mod compare;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod summary;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
