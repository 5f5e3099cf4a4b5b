//! JSON and HTML report files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use minijinja::{Environment, context};
use serde::Serialize;
use tracing::debug;

use crate::core::report::DiffReport;

const REPORT_TEMPLATE: &str = include_str!("templates/report.html");
/// The `.html` suffix turns on minijinja's HTML auto-escaping.
const REPORT_TEMPLATE_NAME: &str = "report.html";

/// One file row as the template sees it.
#[derive(Debug, Serialize)]
struct FileRow<'a> {
    path: &'a str,
    added: u32,
    removed: u32,
    suffix: &'static str,
    css_class: &'static str,
}

/// Write the report as pretty-printed JSON with a trailing newline.
pub fn export_json(report: &DiffReport, path: &Path) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(report).context("serialize report json")?;
    payload.push('\n');
    write_report(path, &payload)
}

/// Write the report as a standalone HTML page.
pub fn export_html(report: &DiffReport, path: &Path) -> Result<()> {
    let html = render_html(report)?;
    write_report(path, &html)
}

/// Render the HTML page. Branch names and paths are escaped.
pub fn render_html(report: &DiffReport) -> Result<String> {
    let mut env = Environment::new();
    env.add_template(REPORT_TEMPLATE_NAME, REPORT_TEMPLATE)
        .context("load report template")?;
    let template = env.get_template(REPORT_TEMPLATE_NAME)?;

    let branches = report
        .branches
        .as_ref()
        .ok_or_else(|| anyhow!("HTML report needs branch information"))?;
    let files: Vec<FileRow<'_>> = report
        .files
        .iter()
        .map(|file| {
            let status = file.status();
            FileRow {
                path: &file.path,
                added: file.added,
                removed: file.removed,
                suffix: status.suffix(),
                css_class: status.css_class(),
            }
        })
        .collect();

    let rendered = template
        .render(context! {
            current => &branches.current,
            target => &branches.target,
            timestamp => report.timestamp.as_deref().unwrap_or_default(),
            added => report.stats.added,
            removed => report.stats.removed,
            files => files,
        })
        .context("render report template")?;
    Ok(rendered)
}

fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create report dir {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write report {}", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::report::{FileStat, LineStats};

    fn sample() -> DiffReport {
        DiffReport {
            files: vec![FileStat {
                path: "src/<script>.rs".to_string(),
                changes: 3,
                added: 2,
                removed: 1,
                is_new_file: true,
                is_removed_file: false,
                is_binary: false,
                hunks: Vec::new(),
            }],
            stats: LineStats {
                added: 2,
                removed: 1,
            },
            timestamp: None,
            branches: None,
        }
        .with_branches("feature", "main")
        .with_timestamp("2024-05-01T12:00:00+02:00")
    }

    #[test]
    fn html_escapes_paths_and_shows_totals() {
        let html = render_html(&sample()).expect("render");
        assert!(html.contains("&lt;script&gt;.rs (new file)"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("+2"));
        assert!(html.contains("class=\"file-path new-file\""));
        assert!(html.contains("Generated: 2024-05-01T12:00:00+02:00"));
    }

    #[test]
    fn html_requires_branches() {
        let report = DiffReport::default();
        assert!(render_html(&report).is_err());
    }

    #[test]
    fn json_export_writes_nested_dirs() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("out/report.json");
        export_json(&sample(), &path).expect("export");
        let raw = fs::read_to_string(&path).expect("read");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["files"][0]["path"], "src/<script>.rs");
        assert_eq!(value["branches"]["target"], "main");
        assert_eq!(value["stats"]["removed"], 1);
    }
}
