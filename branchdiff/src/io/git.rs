//! Git adapter for the diff tools.
//!
//! Everything goes through the `git` executable so that the tools see exactly
//! what the user's own `git diff` would show (config, worktrees, alternates).

use std::path::PathBuf;
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument, warn};

/// Name git prints for a detached HEAD.
pub const DETACHED_HEAD: &str = "HEAD";

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Return the current branch name, or `HEAD` when detached.
    #[instrument(skip_all)]
    pub fn current_branch(&self) -> Result<String> {
        let out = self.run_capture(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let name = out.trim().to_string();
        if name == DETACHED_HEAD {
            warn!("detached HEAD, diffing from the checked out commit");
        }
        debug!(branch = %name, "current branch");
        Ok(name)
    }

    /// Changes on HEAD since it forked from `target` (`git diff target...HEAD`).
    ///
    /// Paths are emitted verbatim (`core.quotePath=false`) so non-ASCII names
    /// are not octal-escaped.
    #[instrument(skip_all, fields(target))]
    pub fn diff_three_dot(&self, target: &str) -> Result<String> {
        let range = format!("{target}...HEAD");
        let out = self.run_capture(&[
            "-c",
            "core.quotePath=false",
            "diff",
            "--no-color",
            "--no-ext-diff",
            &range,
        ])?;
        debug!(bytes = out.len(), "diff captured");
        Ok(out)
    }

    /// True if the working directory is inside a git repository.
    pub fn is_inside_repository(&self) -> bool {
        match self.run(&["rev-parse", "--git-dir"]) {
            Ok(output) => output.status.success(),
            Err(err) => {
                warn!(err = %err, "could not run git");
                false
            }
        }
    }

    /// Check whether a revision (branch, tag, sha) resolves.
    pub fn rev_exists(&self, rev: &str) -> Result<bool> {
        let spec = format!("{rev}^{{commit}}");
        let status = self
            .run(&["rev-parse", "--verify", "--quiet", &spec])?
            .status;
        Ok(status.success())
    }

    fn run_capture(&self, args: &[&str]) -> Result<String> {
        let output = self.run_checked(args)?;
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!("git {} failed: {}", args.join(" "), stderr.trim()));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.join(" ")))
    }
}
