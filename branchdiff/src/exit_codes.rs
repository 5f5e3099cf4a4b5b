//! Stable exit codes for the `branchdiff` and `branchdiff-launch` binaries.

/// Command succeeded, nothing to compare, or the user quit.
pub const OK: i32 = 0;
/// A precondition failed (missing git, missing tool, not a repository) or any
/// other error occurred.
pub const FAILURE: i32 = 1;
