//! CLI tests for `branchdiff-launch`.
//!
//! Every tool command is replaced by a harmless git invocation through a temp
//! config file, so nothing here needs `branchdiff` installed.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use branchdiff::exit_codes;
use branchdiff::test_support::TestRepo;

const GIT_TOOLS: &str = r#"
[launcher]
pause_on_exit = true

[launcher.dependency]
check = { program = "git", args = ["--version"] }
install = { program = "git", args = ["--version"] }

[launcher.tools]
simple = { program = "git", args = ["rev-parse", "--verify", "branchdiff-no-such-ref"] }
advanced = { program = "git", args = ["log", "--format=commit:%s"] }
advanced_help = { program = "git", args = ["--version"] }
"#;

fn write_config(dir: &Path, extra: &str) -> PathBuf {
    write_raw_config(dir, &format!("{extra}\n{GIT_TOOLS}"))
}

fn write_raw_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("launcher.toml");
    fs::write(&path, contents).expect("write config");
    path
}

fn launch(cwd: &Path, config: &Path, stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_branchdiff-launch"))
        .current_dir(cwd)
        .arg("--no-pause")
        .arg("--config")
        .arg(config)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn launcher");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait launcher")
}

fn repo() -> TestRepo {
    let repo = TestRepo::new().expect("repo");
    repo.commit_file("a.txt", "one\n", "first commit").expect("commit");
    repo.commit_file("a.txt", "two\n", "second commit").expect("commit");
    repo
}

#[test]
fn missing_interpreter_stops_before_menu() {
    let repo = repo();
    let cfg_dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(
        cfg_dir.path(),
        "[launcher.interpreter]\nprogram = \"branchdiff-launch-test-missing\"\n",
    );
    let out = launch(repo.path(), &config, "3\n");
    assert_eq!(out.status.code(), Some(exit_codes::FAILURE));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("`branchdiff-launch-test-missing` was not found"));
    assert!(!stdout.contains("Checking for a git repository"));
    assert!(!stdout.contains("Branch diff tools"));
}

#[test]
fn outside_repository_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path(), "");
    let out = launch(dir.path(), &config, "1\n");
    assert_eq!(out.status.code(), Some(exit_codes::FAILURE));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("not inside a git repository"));
    assert!(!stdout.contains("Branch diff tools"));
}

#[test]
fn quit_exits_zero() {
    let repo = repo();
    let cfg_dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(cfg_dir.path(), "");
    let out = launch(repo.path(), &config, "3\n");
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Branch diff tools"));
    assert!(!stdout.contains("commit:"));
}

#[test]
fn invalid_choice_exits_zero_without_running_tools() {
    let repo = repo();
    let cfg_dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(cfg_dir.path(), "");
    let out = launch(repo.path(), &config, "9\n");
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Invalid option, nothing to do."));
    assert!(!stdout.contains("commit:"));
}

#[test]
fn simple_tool_exit_code_is_propagated() {
    let repo = repo();
    let cfg_dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(cfg_dir.path(), "");
    let out = launch(repo.path(), &config, "1\n");
    assert_eq!(out.status.code(), Some(128));
}

#[test]
fn advanced_tool_receives_typed_arguments() {
    let repo = repo();
    let cfg_dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(cfg_dir.path(), "");

    let out = launch(repo.path(), &config, "2\n-n 1\n");
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("git version"));
    assert!(stdout.contains("commit:second commit"));
    assert!(!stdout.contains("commit:first commit"));

    let out = launch(repo.path(), &config, "2\n\n");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("commit:first commit"));
}

#[cfg(unix)]
#[test]
fn dispatched_tool_reads_the_remaining_input() {
    let repo = repo();
    let cfg_dir = tempfile::tempdir().expect("tempdir");
    let tools = GIT_TOOLS.replace(
        r#"simple = { program = "git", args = ["rev-parse", "--verify", "branchdiff-no-such-ref"] }"#,
        r#"simple = { program = "sh", args = ["-c", "read x; echo got:[$x]"] }"#,
    );
    assert_ne!(tools, GIT_TOOLS);
    let config = write_raw_config(cfg_dir.path(), &tools);
    let out = launch(repo.path(), &config, "1\ny\n");
    assert_eq!(out.status.code(), Some(exit_codes::OK));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("got:[y]"), "stdout was: {stdout}");
}
