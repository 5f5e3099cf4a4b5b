//! Orchestration for `branchdiff summary`, the simple diff tool.
//!
//! Prints per-file `+added/-removed` counts against the target branch and
//! offers to print the whole diff afterwards.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::compare::{Comparison, compare_with_target};
use crate::core::patch::parse_patch;
use crate::core::report::DiffReport;
use crate::core::summary::format_summary;
use crate::io::console::confirm;
use crate::io::git::Git;

/// Outcome of `branchdiff summary`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    OnTarget,
    NoDiff,
    Reported { report: DiffReport, full_shown: bool },
}

/// Run the simple tool against `target`.
pub fn run_summary<R: BufRead, W: Write>(
    git: &Git,
    target: &str,
    input: &mut R,
    out: &mut W,
) -> Result<SummaryOutcome> {
    let text = match compare_with_target(git, target, out)? {
        Comparison::OnTarget { .. } => return Ok(SummaryOutcome::OnTarget),
        Comparison::NoDiff { .. } => return Ok(SummaryOutcome::NoDiff),
        Comparison::Diff { text, .. } => text,
    };

    let patch = parse_patch(&text).context("parse diff")?;
    let report = DiffReport::from_patch(&patch, None);
    writeln!(out, "\n=== Diff summary ===")?;
    writeln!(out, "{}", format_summary(&report))?;

    let full_shown = confirm(input, out, "\nShow full diff? (y/n): ")?;
    if full_shown {
        writeln!(out, "\n=== Full diff ===")?;
        writeln!(out, "{text}")?;
    }
    Ok(SummaryOutcome::Reported { report, full_shown })
}
