//! Fatal launcher conditions.
//!
//! `Display` is the exact message shown to the user before the launcher exits
//! with [`branchdiff::exit_codes::FAILURE`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("error: `{program}` was not found. Install it and make sure it is on PATH.")]
    InterpreterMissing { program: String },

    #[error("error: `{dependency}` is not available and `{install}` failed. Install it manually and try again.")]
    DependencyInstallFailed { dependency: String, install: String },

    #[error("error: the current directory is not inside a git repository.")]
    NotARepository,

    #[error("failed to write to the terminal")]
    Output(#[from] std::io::Error),
}
