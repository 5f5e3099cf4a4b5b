//! Configuration stored under `.branchdiff/config.toml`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Config location relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".branchdiff/config.toml";

/// Top-level configuration (TOML).
///
/// Missing fields take their `Default` values; an absent file
/// is the same as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub diff: DiffConfig,
    pub launcher: LauncherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DiffConfig {
    /// Branch the current branch is compared against.
    pub target: String,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            target: "main".to_string(),
        }
    }
}

/// A program plus its fixed leading arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Build a [`Command`] with the configured args followed by `extra`.
    pub fn command<S: AsRef<str>>(&self, extra: &[S]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.args(extra.iter().map(|arg| -> &str { arg.as_ref() }));
        cmd
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.program.trim().is_empty() {
            bail!("{field}.program must not be empty");
        }
        Ok(())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Wait for Enter before exiting so a double-clicked console stays open.
    pub pause_on_exit: bool,
    /// Upper bound for each precondition probe.
    pub probe_timeout_secs: u64,
    /// Upper bound for the dependency install command.
    pub install_timeout_secs: u64,
    /// Bytes of probe stdout/stderr kept for diagnostics.
    pub probe_output_limit_bytes: usize,
    /// Executable the diff tools cannot run without.
    pub interpreter: CommandSpec,
    pub dependency: DependencyConfig,
    /// Succeeds only inside a repository.
    pub repository: CommandSpec,
    pub tools: ToolsConfig,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            pause_on_exit: true,
            probe_timeout_secs: 30,
            install_timeout_secs: 10 * 60,
            probe_output_limit_bytes: 100_000,
            interpreter: CommandSpec::new("git", &["--version"]),
            dependency: DependencyConfig::default(),
            repository: CommandSpec::new("git", &["rev-parse", "--git-dir"]),
            tools: ToolsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DependencyConfig {
    /// No-op command that succeeds when the dependency is usable.
    pub check: CommandSpec,
    /// Run once when `check` fails.
    pub install: CommandSpec,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            check: CommandSpec::new("branchdiff", &["--version"]),
            install: CommandSpec::new("cargo", &["install", "branchdiff"]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToolsConfig {
    pub simple: CommandSpec,
    pub advanced: CommandSpec,
    pub advanced_help: CommandSpec,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            simple: CommandSpec::new("branchdiff", &["summary"]),
            advanced: CommandSpec::new("branchdiff", &["analyze"]),
            advanced_help: CommandSpec::new("branchdiff", &["analyze", "--help"]),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.diff.target.trim().is_empty() {
            return Err(anyhow!("diff.target must not be empty"));
        }
        let launcher = &self.launcher;
        if launcher.probe_timeout_secs == 0 {
            return Err(anyhow!("launcher.probe_timeout_secs must be > 0"));
        }
        if launcher.install_timeout_secs == 0 {
            return Err(anyhow!("launcher.install_timeout_secs must be > 0"));
        }
        if launcher.probe_output_limit_bytes == 0 {
            return Err(anyhow!("launcher.probe_output_limit_bytes must be > 0"));
        }
        launcher.interpreter.validate("launcher.interpreter")?;
        launcher.dependency.check.validate("launcher.dependency.check")?;
        launcher
            .dependency
            .install
            .validate("launcher.dependency.install")?;
        launcher.repository.validate("launcher.repository")?;
        launcher.tools.simple.validate("launcher.tools.simple")?;
        launcher.tools.advanced.validate("launcher.tools.advanced")?;
        launcher
            .tools
            .advanced_help
            .validate("launcher.tools.advanced_help")?;
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `Config::default()`.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        let cfg = Config::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Load the config named on the command line, or the default one under `cwd`.
///
/// An explicitly named file must exist.
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config file {} not found", path.display());
            }
            load_config(path)
        }
        None => load_config(&default_config_path(cwd)),
    }
}

pub fn default_config_path(cwd: &Path) -> PathBuf {
    cwd.join(DEFAULT_CONFIG_PATH)
}

/// Write the default config to `path` unless a file is already there.
///
/// Returns `false` when an existing file was left untouched.
pub fn init_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        debug!(path = %path.display(), "config exists, not overwriting");
        return Ok(false);
    }
    write_config(path, &Config::default())?;
    Ok(true)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &Config) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
