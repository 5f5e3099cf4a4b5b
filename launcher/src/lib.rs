//! Menu-driven launcher for the branch diff tools.
//!
//! Before showing the menu the launcher checks that the required executable
//! is present, installs the tool dependency when it is missing, and confirms
//! the working directory is inside a git repository. The chosen tool then runs
//! on the user's terminal and its exit code becomes the launcher's.
//!
//! Process execution goes through [`runner::CommandRunner`] so the whole flow
//! in [`session`] can be driven without spawning anything.

pub mod args;
pub mod error;
pub mod input;
pub mod menu;
pub mod preflight;
pub mod runner;
pub mod session;
#[cfg(test)]
mod test_support;
