//! Shared first half of both diff tools: find the branch, fetch the diff.

use std::io::Write;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::io::git::Git;

/// What the comparison against the target branch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    /// HEAD is the target branch itself.
    OnTarget { current: String },
    /// The branch has no changes since it forked from the target.
    NoDiff { current: String },
    /// Raw `git diff target...HEAD` output.
    Diff { current: String, text: String },
}

/// Print the branch banner and fetch the diff against `target`.
///
/// Progress messages go to `out`; `OnTarget`/`NoDiff` messages are printed
/// here so callers only handle the `Diff` case.
pub fn compare_with_target<W: Write>(git: &Git, target: &str, out: &mut W) -> Result<Comparison> {
    if !git.is_inside_repository() {
        bail!("not inside a git repository");
    }
    let current = git
        .current_branch()
        .context("failed to get current branch")?;
    writeln!(out, "Current branch: {current}")?;

    if current == target {
        info!(target, "already on target branch");
        writeln!(out, "Already on {target}, nothing to compare")?;
        return Ok(Comparison::OnTarget { current });
    }

    if !git
        .rev_exists(target)
        .context("failed to look up target branch")?
    {
        bail!("unknown target branch '{target}'");
    }

    writeln!(out, "Fetching diff against {target}...")?;
    let text = git
        .diff_three_dot(target)
        .context("failed to get diff")?;
    if text.trim().is_empty() {
        writeln!(out, "No differences between the current branch and {target}")?;
        return Ok(Comparison::NoDiff { current });
    }
    debug!(bytes = text.len(), "diff fetched");
    Ok(Comparison::Diff { current, text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestRepo;

    #[test]
    fn on_target_branch_short_circuits() {
        let repo = TestRepo::new().expect("repo");
        repo.commit_file("a.txt", "a\n", "initial").expect("commit");
        let mut out = Vec::new();
        let cmp = compare_with_target(&Git::new(repo.path()), "main", &mut out).expect("compare");
        assert_eq!(
            cmp,
            Comparison::OnTarget {
                current: "main".to_string()
            }
        );
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("Current branch: main"));
        assert!(text.contains("Already on main, nothing to compare"));
    }

    #[test]
    fn fresh_branch_has_no_diff() {
        let repo = TestRepo::new().expect("repo");
        repo.commit_file("a.txt", "a\n", "initial").expect("commit");
        repo.checkout_new_branch("feature").expect("branch");
        let mut out = Vec::new();
        let cmp = compare_with_target(&Git::new(repo.path()), "main", &mut out).expect("compare");
        assert!(matches!(cmp, Comparison::NoDiff { .. }));
        assert!(
            String::from_utf8(out)
                .expect("utf8")
                .contains("No differences between the current branch and main")
        );
    }

    #[test]
    fn unknown_target_is_an_error() {
        let repo = TestRepo::new().expect("repo");
        repo.commit_file("a.txt", "a\n", "initial").expect("commit");
        repo.checkout_new_branch("feature").expect("branch");
        let mut out = Vec::new();
        let err = compare_with_target(&Git::new(repo.path()), "develop", &mut out)
            .expect_err("missing target");
        assert!(format!("{err:#}").contains("unknown target branch 'develop'"));
        assert!(!String::from_utf8(out).expect("utf8").contains("Fetching diff"));
    }

    #[test]
    fn plain_directory_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut out = Vec::new();
        let err = compare_with_target(&Git::new(temp.path()), "main", &mut out)
            .expect_err("not a repo");
        assert!(format!("{err:#}").contains("not inside a git repository"));
        assert!(out.is_empty());
    }
}
