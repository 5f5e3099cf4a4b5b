//! I/O helpers for the diff tools and the launcher.

pub mod config;
pub mod console;
pub mod export;
pub mod git;
pub mod process;
