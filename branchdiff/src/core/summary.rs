//! Plain-text summary rendering.

use crate::core::report::DiffReport;

/// Render the summary block printed under `=== Diff summary ===`.
///
/// When the report carries branch metadata a `Branches:` line leads the block.
pub fn format_summary(report: &DiffReport) -> String {
    let mut lines = Vec::with_capacity(report.files.len() + 3);
    if let Some(branches) = &report.branches {
        lines.push(format!(
            "Branches: {} -> {}",
            branches.current, branches.target
        ));
    }
    lines.push(format!(
        "Total: {} lines added, {} lines removed",
        report.stats.added, report.stats.removed
    ));
    lines.push(String::new());
    lines.extend(report.files.iter().map(|file| {
        format!(
            "{}: +{}/-{}{}",
            file.path,
            file.added,
            file.removed,
            file.status().suffix()
        )
    }));
    if report.files.is_empty() {
        lines.pop();
    }
    lines.join("\n")
}
