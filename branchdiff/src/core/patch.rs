//! Unified diff parser for `git diff` output.
//!
//! Parsing is line-oriented and driven by the hunk header counts: once a hunk
//! is open, exactly `source_length` old lines and `target_length` new lines are
//! consumed before header parsing resumes. This keeps content lines such as
//! `--- foo` (a removed line that happens to start with dashes) from being
//! mistaken for file headers.

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;

const DEV_NULL: &str = "/dev/null";

static HUNK_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@ ?(.*)$")
        .expect("hunk header regex should be valid")
});

/// A single `@@ ... @@` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hunk {
    pub source_start: u32,
    pub source_length: u32,
    pub target_start: u32,
    pub target_length: u32,
    /// Text after the closing `@@` (usually the enclosing function).
    pub section_header: String,
    pub added: u32,
    pub removed: u32,
}

/// All changes recorded for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchedFile {
    /// Old path as written in the diff (`a/...` or `/dev/null`).
    pub source_file: String,
    /// New path as written in the diff (`b/...` or `/dev/null`).
    pub target_file: String,
    pub is_added_file: bool,
    pub is_removed_file: bool,
    pub is_binary_file: bool,
    pub is_rename: bool,
    pub hunks: Vec<Hunk>,
}

impl PatchedFile {
    /// Repository-relative path: the new path, or the old one for deletions.
    pub fn path(&self) -> String {
        let raw = if self.is_removed_file || self.target_file == DEV_NULL {
            &self.source_file
        } else {
            &self.target_file
        };
        strip_side_prefix(raw).to_string()
    }

    pub fn added(&self) -> u32 {
        self.hunks.iter().map(|h| h.added).sum()
    }

    pub fn removed(&self) -> u32 {
        self.hunks.iter().map(|h| h.removed).sum()
    }
}

/// Parsed diff: files in the order they appear.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSet {
    pub files: Vec<PatchedFile>,
}

impl PatchSet {
    pub fn added(&self) -> u32 {
        self.files.iter().map(PatchedFile::added).sum()
    }

    pub fn removed(&self) -> u32 {
        self.files.iter().map(PatchedFile::removed).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Lines still expected by the currently open hunk.
#[derive(Debug, Clone, Copy)]
struct Remaining {
    source: u32,
    target: u32,
}

impl Remaining {
    fn is_done(self) -> bool {
        self.source == 0 && self.target == 0
    }
}

/// Parse `git diff` unified output into a [`PatchSet`].
///
/// Blank input yields an empty set.
pub fn parse_patch(text: &str) -> Result<PatchSet> {
    let mut files: Vec<PatchedFile> = Vec::new();
    let mut open: Option<Remaining> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        if let Some(remaining) = open.as_mut() {
            let file = files
                .last_mut()
                .ok_or_else(|| anyhow!("line {line_no}: hunk content without a file"))?;
            let hunk = file
                .hunks
                .last_mut()
                .ok_or_else(|| anyhow!("line {line_no}: hunk content without a hunk"))?;
            consume_hunk_line(line, hunk, remaining)
                .with_context(|| format!("line {line_no}"))?;
            if remaining.is_done() {
                open = None;
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("diff --git ") {
            files.push(file_from_git_header(rest));
            continue;
        }

        if line.starts_with("\\ ") {
            // "\ No newline at end of file" after the last line of a hunk.
            continue;
        }

        if let Some(rest) = line.strip_prefix("--- ") {
            // Plain (non-git) diffs have no `diff --git` line; a `---` after a
            // file that already has hunks starts the next file.
            let starts_new = files.last().is_none_or(|f| !f.hunks.is_empty());
            if starts_new {
                files.push(PatchedFile::default());
            }
            let file = files.last_mut().ok_or_else(|| anyhow!("no current file"))?;
            file.source_file = header_path(rest);
            if file.source_file == DEV_NULL {
                file.is_added_file = true;
            }
            continue;
        }

        if let Some(rest) = line.strip_prefix("+++ ") {
            let file = files
                .last_mut()
                .ok_or_else(|| anyhow!("line {line_no}: '+++' header without '---'"))?;
            file.target_file = header_path(rest);
            if file.target_file == DEV_NULL {
                file.is_removed_file = true;
            }
            continue;
        }

        if line.starts_with("@@ ") {
            let hunk = parse_hunk_header(line).with_context(|| format!("line {line_no}"))?;
            let file = files
                .last_mut()
                .ok_or_else(|| anyhow!("line {line_no}: hunk header without a file"))?;
            let remaining = Remaining {
                source: hunk.source_length,
                target: hunk.target_length,
            };
            file.hunks.push(hunk);
            if !remaining.is_done() {
                open = Some(remaining);
            }
            continue;
        }

        if let Some(file) = files.last_mut() {
            apply_extended_header(line, file);
        }
    }

    if open.is_some() {
        bail!("diff ended inside an unterminated hunk");
    }

    Ok(PatchSet { files })
}

fn consume_hunk_line(line: &str, hunk: &mut Hunk, remaining: &mut Remaining) -> Result<()> {
    match line.chars().next() {
        Some('+') => {
            remaining.target = take_line(remaining.target, line)?;
            hunk.added += 1;
        }
        Some('-') => {
            remaining.source = take_line(remaining.source, line)?;
            hunk.removed += 1;
        }
        // Some tools strip the single space from blank context lines.
        Some(' ') | None => {
            remaining.source = take_line(remaining.source, line)?;
            remaining.target = take_line(remaining.target, line)?;
        }
        Some('\\') => {}
        Some(_) => bail!("unexpected line inside hunk: '{line}'"),
    }
    Ok(())
}

/// One line off a hunk side's remaining count.
fn take_line(remaining: u32, line: &str) -> Result<u32> {
    remaining
        .checked_sub(1)
        .ok_or_else(|| anyhow!("line beyond the hunk's declared length: '{line}'"))
}

fn parse_hunk_header(line: &str) -> Result<Hunk> {
    let caps = HUNK_HEADER_RE
        .captures(line)
        .ok_or_else(|| anyhow!("malformed hunk header: '{line}'"))?;
    let number = |i: usize, default: u32| -> Result<u32> {
        match caps.get(i) {
            Some(m) => m
                .as_str()
                .parse()
                .with_context(|| format!("hunk header number '{}'", m.as_str())),
            None => Ok(default),
        }
    };
    Ok(Hunk {
        source_start: number(1, 0)?,
        source_length: number(2, 1)?,
        target_start: number(3, 0)?,
        target_length: number(4, 1)?,
        section_header: caps
            .get(5)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        added: 0,
        removed: 0,
    })
}

/// Build a file from the `a/old b/new` part of a `diff --git` line.
fn file_from_git_header(rest: &str) -> PatchedFile {
    let rest = rest.trim();
    let (source, target) = match rest.rfind(" b/") {
        Some(split) => (&rest[..split], &rest[split + 1..]),
        None => match rest.split_once(' ') {
            Some((a, b)) => (a, b),
            None => (rest, rest),
        },
    };
    PatchedFile {
        source_file: unquote(source),
        target_file: unquote(target),
        ..PatchedFile::default()
    }
}

/// Git extended header lines between `diff --git` and the first hunk.
fn apply_extended_header(line: &str, file: &mut PatchedFile) {
    if line.starts_with("new file mode") {
        file.is_added_file = true;
    } else if line.starts_with("deleted file mode") {
        file.is_removed_file = true;
    } else if let Some(from) = line.strip_prefix("rename from ") {
        file.is_rename = true;
        file.source_file = format!("a/{}", unquote(from.trim()));
    } else if let Some(to) = line.strip_prefix("rename to ") {
        file.is_rename = true;
        file.target_file = format!("b/{}", unquote(to.trim()));
    } else if line == "GIT binary patch" {
        file.is_binary_file = true;
    } else if let Some(rest) = line.strip_prefix("Binary files ") {
        file.is_binary_file = true;
        if let Some((source, target)) = rest
            .strip_suffix(" differ")
            .and_then(|pair| pair.split_once(" and "))
        {
            if source == DEV_NULL {
                file.is_added_file = true;
            }
            if target == DEV_NULL {
                file.is_removed_file = true;
            }
        }
    }
}

/// Path from a `---`/`+++` header, without any trailing tab-separated timestamp.
fn header_path(rest: &str) -> String {
    let path = rest.split('\t').next().unwrap_or(rest).trim_end();
    unquote(path)
}

/// Undo git's C-style path quoting, e.g. `"a/\344\270\255.txt"`.
fn unquote(path: &str) -> String {
    let Some(inner) = path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) else {
        return path.to_string();
    };
    let bytes = inner.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }
        let octal = bytes
            .get(i + 1..i + 4)
            .filter(|digits| digits.iter().all(|d| (b'0'..=b'7').contains(d)));
        if let Some(digits) = octal {
            let byte = digits
                .iter()
                .fold(0u8, |acc, d| acc.wrapping_mul(8).wrapping_add(d - b'0'));
            decoded.push(byte);
            i += 4;
            continue;
        }
        decoded.push(match bytes[i + 1] {
            b'n' => b'\n',
            b't' => b'\t',
            b'r' => b'\r',
            b'a' => 0x07,
            b'b' => 0x08,
            b'f' => 0x0c,
            b'v' => 0x0b,
            other => other,
        });
        i += 2;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn strip_side_prefix(path: &str) -> &str {
    path.strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path)
}
