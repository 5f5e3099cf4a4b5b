//! Environment checks that must pass before the menu is shown.
//!
//! Order is fixed: interpreter, dependency (with one install attempt),
//! repository. The first failure stops the sequence.

use std::io::Write;
use std::time::Duration;

use branchdiff::io::config::LauncherConfig;
use tracing::{info, warn};

use crate::error::LaunchError;
use crate::runner::{CommandRunner, ProbeOutcome};

/// Run all three checks, printing one progress line per step.
pub fn check_environment<C: CommandRunner, W: Write>(
    config: &LauncherConfig,
    runner: &C,
    out: &mut W,
) -> Result<(), LaunchError> {
    let probe_timeout = Duration::from_secs(config.probe_timeout_secs);

    writeln!(out, "[1/3] Checking for {}...", config.interpreter.program)?;
    let outcome = runner.probe(&config.interpreter, probe_timeout);
    if !outcome.passed() {
        warn!(?outcome, command = %config.interpreter, "interpreter probe failed");
        return Err(LaunchError::InterpreterMissing {
            program: config.interpreter.program.clone(),
        });
    }

    let dependency = &config.dependency;
    writeln!(out, "[2/3] Checking for {}...", dependency.check.program)?;
    if !runner.probe(&dependency.check, probe_timeout).passed() {
        writeln!(
            out,
            "{} not found, installing with `{}`...",
            dependency.check.program, dependency.install
        )?;
        install_dependency(config, runner)?;
        writeln!(out, "{} installed.", dependency.check.program)?;
    }

    writeln!(out, "[3/3] Checking for a git repository...")?;
    let outcome = runner.probe(&config.repository, probe_timeout);
    if !outcome.passed() {
        warn!(?outcome, command = %config.repository, "repository probe failed");
        return Err(LaunchError::NotARepository);
    }

    info!("environment checks passed");
    Ok(())
}

/// One install attempt, then a re-check so a "successful" install that did not
/// put the tool on PATH still counts as a failure.
fn install_dependency<C: CommandRunner>(
    config: &LauncherConfig,
    runner: &C,
) -> Result<(), LaunchError> {
    let dependency = &config.dependency;
    let failed = || LaunchError::DependencyInstallFailed {
        dependency: dependency.check.program.clone(),
        install: dependency.install.to_string(),
    };

    let install = runner.probe(
        &dependency.install,
        Duration::from_secs(config.install_timeout_secs),
    );
    if let ProbeOutcome::Failed { stderr, .. } = &install {
        warn!(stderr = %stderr, "dependency install failed");
    }
    if !install.passed() {
        return Err(failed());
    }

    let recheck = runner.probe(
        &dependency.check,
        Duration::from_secs(config.probe_timeout_secs),
    );
    if !recheck.passed() {
        warn!(?recheck, "dependency still unavailable after install");
        return Err(failed());
    }
    info!(dependency = %dependency.check.program, "dependency installed");
    Ok(())
}
