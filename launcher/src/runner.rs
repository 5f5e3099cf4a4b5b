//! Process boundary for the launcher.
//!
//! The [`CommandRunner`] trait decouples the menu flow from real processes.
//! Tests use scripted runners that record calls without spawning anything.

use std::time::Duration;

use anyhow::Result;
use branchdiff::io::config::CommandSpec;
use branchdiff::io::process::{exit_code_of, run_command_with_timeout, run_inherited};
use tracing::{debug, instrument, warn};

/// Result of a captured, time-limited probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Exited with status 0.
    Passed,
    /// Ran but exited non-zero (or was killed).
    Failed { code: Option<i32>, stderr: String },
    /// Did not finish within the timeout.
    TimedOut,
    /// Could not be started at all (usually: not on PATH).
    Unavailable { reason: String },
}

impl ProbeOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, ProbeOutcome::Passed)
    }
}

/// Abstraction over process execution.
pub trait CommandRunner {
    /// Run `spec` with output captured and a timeout.
    fn probe(&self, spec: &CommandSpec, timeout: Duration) -> ProbeOutcome;

    /// Run `spec` followed by `args` on the user's terminal and return its exit code.
    fn run_interactive(&self, spec: &CommandSpec, args: &[String]) -> Result<i32>;
}

/// Runner that spawns real processes.
pub struct SystemRunner {
    pub output_limit_bytes: usize,
}

impl CommandRunner for SystemRunner {
    #[instrument(skip_all, fields(command = %spec))]
    fn probe(&self, spec: &CommandSpec, timeout: Duration) -> ProbeOutcome {
        let no_args: &[&str] = &[];
        let output = match run_command_with_timeout(
            spec.command(no_args),
            timeout,
            self.output_limit_bytes,
        ) {
            Ok(output) => output,
            Err(err) => {
                debug!(err = %format!("{err:#}"), "probe could not start");
                return ProbeOutcome::Unavailable {
                    reason: format!("{err:#}"),
                };
            }
        };
        if output.timed_out {
            warn!("probe timed out");
            return ProbeOutcome::TimedOut;
        }
        if output.status.success() {
            debug!("probe passed");
            return ProbeOutcome::Passed;
        }
        debug!(exit_code = ?output.status.code(), "probe failed");
        ProbeOutcome::Failed {
            code: output.status.code(),
            stderr: output.stderr_lossy(),
        }
    }

    #[instrument(skip_all, fields(command = %spec, extra_args = args.len()))]
    fn run_interactive(&self, spec: &CommandSpec, args: &[String]) -> Result<i32> {
        let status = run_inherited(spec.command(args))?;
        Ok(exit_code_of(status))
    }
}
