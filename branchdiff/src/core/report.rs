//! Report model derived from a parsed diff.
//!
//! The report is what every output format renders: the text summary, the JSON
//! export and the HTML page all read from [`DiffReport`].

use serde::{Deserialize, Serialize};

use crate::core::patch::{Hunk, PatchSet, PatchedFile};

/// Added/removed line totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStats {
    pub added: u32,
    pub removed: u32,
}

/// Per-hunk detail in the advanced report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunkStat {
    pub start_line: u32,
    pub line_count: u32,
    pub changes: u32,
    pub added: u32,
    pub removed: u32,
}

impl From<&Hunk> for HunkStat {
    fn from(hunk: &Hunk) -> Self {
        Self {
            start_line: hunk.source_start,
            line_count: hunk.source_length,
            changes: hunk.added + hunk.removed,
            added: hunk.added,
            removed: hunk.removed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStat {
    pub path: String,
    pub changes: u32,
    pub added: u32,
    pub removed: u32,
    pub is_new_file: bool,
    pub is_removed_file: bool,
    pub is_binary: bool,
    pub hunks: Vec<HunkStat>,
}

impl FileStat {
    fn from_patched(file: &PatchedFile) -> Self {
        let added = file.added();
        let removed = file.removed();
        Self {
            path: file.path(),
            changes: added + removed,
            added,
            removed,
            is_new_file: file.is_added_file,
            is_removed_file: file.is_removed_file,
            is_binary: file.is_binary_file,
            hunks: file.hunks.iter().map(HunkStat::from).collect(),
        }
    }

    /// Status label shown next to the path. New beats deleted beats binary.
    pub fn status(&self) -> FileStatus {
        if self.is_new_file {
            FileStatus::New
        } else if self.is_removed_file {
            FileStatus::Deleted
        } else if self.is_binary {
            FileStatus::Binary
        } else {
            FileStatus::Modified
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    New,
    Deleted,
    Binary,
    Modified,
}

impl FileStatus {
    /// Suffix appended after `+added/-removed`; empty for plain modifications.
    pub fn suffix(self) -> &'static str {
        match self {
            FileStatus::New => " (new file)",
            FileStatus::Deleted => " (deleted)",
            FileStatus::Binary => " (binary)",
            FileStatus::Modified => "",
        }
    }

    /// CSS class used by the HTML report.
    pub fn css_class(self) -> &'static str {
        match self {
            FileStatus::New => "new-file",
            FileStatus::Deleted => "deleted-file",
            FileStatus::Binary | FileStatus::Modified => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branches {
    pub current: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub files: Vec<FileStat>,
    pub stats: LineStats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Branches>,
}

impl DiffReport {
    /// Build a report, keeping only files whose path contains `filter`.
    ///
    /// Totals cover the kept files only.
    pub fn from_patch(patch: &PatchSet, filter: Option<&str>) -> Self {
        let mut report = DiffReport::default();
        for file in &patch.files {
            let stat = FileStat::from_patched(file);
            if let Some(needle) = filter
                && !stat.path.contains(needle)
            {
                continue;
            }
            report.stats.added += stat.added;
            report.stats.removed += stat.removed;
            report.files.push(stat);
        }
        report
    }

    pub fn with_branches(mut self, current: &str, target: &str) -> Self {
        self.branches = Some(Branches {
            current: current.to_string(),
            target: target.to_string(),
        });
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}
