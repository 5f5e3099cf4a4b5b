//! One launcher run: checks, menu, dispatch, final pause.

use std::io::{BufRead, Write};

use anyhow::Result;
use branchdiff::exit_codes;
use branchdiff::io::config::LauncherConfig;
use branchdiff::io::console::{ask, pause};
use tracing::{debug, info};

use crate::args::split_args;
use crate::menu::{ARGS_PROMPT, CHOICE_PROMPT, INVALID_CHOICE, MENU, MenuChoice, PAUSE_PROMPT};
use crate::preflight::check_environment;
use crate::runner::CommandRunner;

/// Run the launcher and return the process exit code.
///
/// Fatal precondition failures are reported on `out` and yield
/// [`exit_codes::FAILURE`]; only I/O errors on `input`/`out` and failures to
/// start a tool come back as `Err`.
pub fn run_session<C: CommandRunner, R: BufRead, W: Write>(
    config: &LauncherConfig,
    runner: &C,
    input: &mut R,
    out: &mut W,
) -> Result<i32> {
    if let Err(err) = check_environment(config, runner, out) {
        writeln!(out, "{err}")?;
        finish(config, input, out)?;
        return Ok(exit_codes::FAILURE);
    }

    writeln!(out)?;
    write!(out, "{MENU}")?;
    writeln!(out)?;
    let line = ask(input, out, CHOICE_PROMPT)?.unwrap_or_default();
    let choice = MenuChoice::parse(&line);
    debug!(?choice, "menu choice");

    let code = match choice {
        MenuChoice::Simple => {
            info!(command = %config.tools.simple, "running simple tool");
            runner.run_interactive(&config.tools.simple, &[])?
        }
        MenuChoice::Advanced => {
            let help_code = runner.run_interactive(&config.tools.advanced_help, &[])?;
            debug!(command = %config.tools.advanced_help, exit_code = help_code, "help finished");
            writeln!(out)?;
            let raw = ask(input, out, ARGS_PROMPT)?.unwrap_or_default();
            let args = split_args(&raw);
            info!(command = %config.tools.advanced, args = ?args, "running advanced tool");
            runner.run_interactive(&config.tools.advanced, &args)?
        }
        MenuChoice::Quit => return Ok(exit_codes::OK),
        MenuChoice::Invalid(_) => {
            writeln!(out, "{INVALID_CHOICE}")?;
            exit_codes::OK
        }
    };

    finish(config, input, out)?;
    Ok(code)
}

fn finish<R: BufRead, W: Write>(config: &LauncherConfig, input: &mut R, out: &mut W) -> Result<()> {
    if config.pause_on_exit {
        writeln!(out)?;
        pause(input, out, PAUSE_PROMPT)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRunner;
    use std::io::Cursor;

    fn config() -> LauncherConfig {
        LauncherConfig {
            pause_on_exit: false,
            ..LauncherConfig::default()
        }
    }

    fn run(runner: &ScriptedRunner, config: &LauncherConfig, input: &str) -> (i32, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let code = run_session(config, runner, &mut input, &mut out).expect("session");
        (code, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn invalid_choices_run_nothing() {
        for input in ["", "0\n", "4\n", " 1\n", "yes\n", "1 2\n"] {
            let runner = ScriptedRunner::all_passing();
            let (code, out) = run(&runner, &config(), input);
            assert_eq!(code, exit_codes::OK, "input {input:?}");
            assert!(out.contains(INVALID_CHOICE), "input {input:?}");
            assert!(runner.runs().is_empty(), "input {input:?}");
        }
    }

    #[test]
    fn missing_interpreter_exits_non_zero_before_repository_check() {
        let runner = ScriptedRunner::all_passing().fail_probe("git --version");
        let (code, out) = run(&runner, &config(), "1\n");
        assert_eq!(code, exit_codes::FAILURE);
        assert!(out.contains("`git` was not found"));
        assert!(!runner.probes().contains(&"git rev-parse --git-dir".to_string()));
        assert!(runner.runs().is_empty());
    }

    #[test]
    fn fatal_error_waits_for_acknowledgment() {
        let runner = ScriptedRunner::all_passing().fail_probe("git --version");
        let pausing = LauncherConfig::default();
        let (code, out) = run(&runner, &pausing, "\n");
        assert_eq!(code, exit_codes::FAILURE);
        assert!(out.contains("`git` was not found"));
        assert!(out.trim_end().ends_with(PAUSE_PROMPT));
    }

    #[test]
    fn not_a_repository_skips_menu() {
        let runner = ScriptedRunner::all_passing().fail_probe("git rev-parse --git-dir");
        let (code, out) = run(&runner, &config(), "1\n");
        assert_eq!(code, exit_codes::FAILURE);
        assert!(out.contains("not inside a git repository"));
        assert!(!out.contains("Branch diff tools"));
        assert!(runner.runs().is_empty());
    }

    #[test]
    fn advanced_with_empty_args_runs_without_args() {
        let runner = ScriptedRunner::all_passing();
        let (code, out) = run(&runner, &config(), "2\n\n");
        assert_eq!(code, exit_codes::OK);
        assert!(out.contains(ARGS_PROMPT));
        assert_eq!(
            runner.runs(),
            vec![
                ("branchdiff analyze --help".to_string(), Vec::new()),
                ("branchdiff analyze".to_string(), Vec::new()),
            ]
        );
    }

    #[test]
    fn advanced_forwards_argument_text() {
        let runner = ScriptedRunner::all_passing();
        let (_, _) = run(&runner, &config(), "2\n--target develop --html \"out dir/r.html\"\n");
        let runs = runner.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(
            runs[1].1,
            vec!["--target", "develop", "--html", "out dir/r.html"]
        );
    }

    #[test]
    fn advanced_with_closed_input_runs_without_args() {
        let runner = ScriptedRunner::all_passing();
        run(&runner, &config(), "2\n");
        assert_eq!(runner.runs()[1], ("branchdiff analyze".to_string(), Vec::new()));
    }

    #[test]
    fn quit_exits_zero_without_running_tools() {
        let runner = ScriptedRunner::all_passing();
        let pausing = LauncherConfig::default();
        let (code, out) = run(&runner, &pausing, "3\n");
        assert_eq!(code, exit_codes::OK);
        assert!(runner.runs().is_empty());
        assert!(!out.contains(PAUSE_PROMPT));
    }

    #[test]
    fn simple_tool_status_becomes_exit_code() {
        let runner = ScriptedRunner::all_passing().exit_code("branchdiff summary", 3);
        let (code, _) = run(&runner, &config(), "1\n");
        assert_eq!(code, 3);
        assert_eq!(
            runner.runs(),
            vec![("branchdiff summary".to_string(), Vec::new())]
        );
    }

    #[test]
    fn pause_waits_after_tool() {
        let runner = ScriptedRunner::all_passing();
        let pausing = LauncherConfig::default();
        let (code, out) = run(&runner, &pausing, "1\n\n");
        assert_eq!(code, exit_codes::OK);
        assert!(out.trim_end().ends_with(PAUSE_PROMPT));
    }
}
