//! Test-only scripted [`CommandRunner`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use anyhow::Result;
use branchdiff::io::config::CommandSpec;

use crate::runner::{CommandRunner, ProbeOutcome};

/// Records every call; probes pass unless scripted to fail.
///
/// Commands are keyed by their display form, e.g. `"git --version"`.
#[derive(Default)]
pub struct ScriptedRunner {
    /// Remaining failures per probe; `None` fails forever.
    failures: RefCell<HashMap<String, Option<usize>>>,
    exit_codes: HashMap<String, i32>,
    probes: RefCell<Vec<String>>,
    runs: RefCell<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    pub fn all_passing() -> Self {
        Self::default()
    }

    pub fn fail_probe(self, command: &str) -> Self {
        self.failures.borrow_mut().insert(command.to_string(), None);
        self
    }

    pub fn fail_probe_times(self, command: &str, times: usize) -> Self {
        self.failures
            .borrow_mut()
            .insert(command.to_string(), Some(times));
        self
    }

    pub fn exit_code(mut self, command: &str, code: i32) -> Self {
        self.exit_codes.insert(command.to_string(), code);
        self
    }

    pub fn probes(&self) -> Vec<String> {
        self.probes.borrow().clone()
    }

    /// Interactive runs as `(command, extra args)`.
    pub fn runs(&self) -> Vec<(String, Vec<String>)> {
        self.runs.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn probe(&self, spec: &CommandSpec, _timeout: Duration) -> ProbeOutcome {
        let key = spec.to_string();
        self.probes.borrow_mut().push(key.clone());
        let mut failures = self.failures.borrow_mut();
        let fail = match failures.get_mut(&key) {
            None => false,
            Some(None) => true,
            Some(Some(0)) => false,
            Some(Some(remaining)) => {
                *remaining -= 1;
                true
            }
        };
        if fail {
            ProbeOutcome::Failed {
                code: Some(1),
                stderr: format!("scripted failure: {key}"),
            }
        } else {
            ProbeOutcome::Passed
        }
    }

    fn run_interactive(&self, spec: &CommandSpec, args: &[String]) -> Result<i32> {
        let key = spec.to_string();
        self.runs.borrow_mut().push((key.clone(), args.to_vec()));
        Ok(self.exit_codes.get(&key).copied().unwrap_or(0))
    }
}
