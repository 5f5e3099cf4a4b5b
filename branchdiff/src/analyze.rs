//! Orchestration for `branchdiff analyze`, the advanced diff tool.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::info;

use crate::compare::{Comparison, compare_with_target};
use crate::core::patch::parse_patch;
use crate::core::report::DiffReport;
use crate::core::summary::format_summary;
use crate::io::export::{export_html, export_json};
use crate::io::git::Git;

/// Options for one `analyze` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    pub target: String,
    /// Keep only files whose path contains this text.
    pub filter: Option<String>,
    pub json: Option<PathBuf>,
    pub html: Option<PathBuf>,
    /// Print the raw diff after the summary.
    pub full: bool,
}

/// Outcome of `branchdiff analyze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    OnTarget,
    NoDiff,
    Reported(DiffReport),
}

/// Run the advanced tool.
pub fn run_analyze<W: Write>(git: &Git, options: &AnalyzeOptions, out: &mut W) -> Result<AnalyzeOutcome> {
    let target = options.target.as_str();
    let (current, text) = match compare_with_target(git, target, out)? {
        Comparison::OnTarget { .. } => return Ok(AnalyzeOutcome::OnTarget),
        Comparison::NoDiff { .. } => return Ok(AnalyzeOutcome::NoDiff),
        Comparison::Diff { current, text } => (current, text),
    };

    let patch = parse_patch(&text).context("parse diff")?;
    let report = DiffReport::from_patch(&patch, options.filter.as_deref())
        .with_branches(&current, target)
        .with_timestamp(Local::now().to_rfc3339());
    info!(
        files = report.files.len(),
        added = report.stats.added,
        removed = report.stats.removed,
        "diff analyzed"
    );

    writeln!(out, "\n=== Diff summary ===")?;
    writeln!(out, "{}", format_summary(&report))?;

    if let Some(path) = &options.json {
        export_json(&report, path)?;
        writeln!(out, "JSON report written to {}", path.display())?;
    }
    if let Some(path) = &options.html {
        export_html(&report, path)?;
        writeln!(out, "HTML report written to {}", path.display())?;
    }

    if options.full {
        writeln!(out, "\n=== Full diff ===")?;
        writeln!(out, "{text}")?;
    }
    Ok(AnalyzeOutcome::Reported(report))
}
