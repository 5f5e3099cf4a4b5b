//! Branch diff reporting tools.
//!
//! `branchdiff summary` prints a short per-file summary of the current branch
//! against the target branch; `branchdiff analyze` adds filtering and JSON/HTML
//! export. `branchdiff init` writes the default config file.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use branchdiff::analyze::{AnalyzeOptions, run_analyze};
use branchdiff::exit_codes;
use branchdiff::io::config::{default_config_path, init_config, resolve_config};
use branchdiff::io::git::Git;
use branchdiff::logging;
use branchdiff::summary::run_summary;
use clap::{Args, Parser, Subcommand, ValueHint};

#[derive(Parser)]
#[command(
    name = "branchdiff",
    version,
    about = "Summarise the diff between the current branch and a target branch"
)]
struct Cli {
    /// Config file (defaults to .branchdiff/config.toml).
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the default config to .branchdiff/config.toml (or --config).
    Init {
        /// Overwrite an existing config file.
        #[arg(short, long)]
        force: bool,
    },
    /// Per-file +added/-removed summary, then optionally the full diff.
    Summary,
    /// Summary with filtering and JSON/HTML export.
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
struct AnalyzeArgs {
    /// Target branch (defaults to diff.target from config, usually main).
    #[arg(short, long, value_name = "BRANCH")]
    target: Option<String>,

    /// Only include files whose path contains TEXT (e.g. .py).
    #[arg(short, long, value_name = "TEXT")]
    filter: Option<String>,

    /// Export the report as JSON to PATH.
    #[arg(short, long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    json: Option<PathBuf>,

    /// Export the report as HTML to PATH.
    #[arg(short = 'H', long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    html: Option<PathBuf>,

    /// Print the full diff after the summary.
    #[arg(long)]
    full: bool,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(exit_codes::FAILURE);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let git = Git::new(&cwd);
    let mut out = io::stdout().lock();

    match cli.command {
        Command::Init { force } => {
            let path = cli.config.unwrap_or_else(|| default_config_path(&cwd));
            cmd_init(&path, force, &mut out)?;
        }
        Command::Summary => {
            let config = resolve_config(cli.config.as_deref(), &cwd)?;
            let mut input = io::stdin().lock();
            run_summary(&git, &config.diff.target, &mut input, &mut out)?;
        }
        Command::Analyze(args) => {
            let config = resolve_config(cli.config.as_deref(), &cwd)?;
            let options = AnalyzeOptions {
                target: args.target.unwrap_or(config.diff.target),
                filter: args.filter,
                json: args.json,
                html: args.html,
                full: args.full,
            };
            run_analyze(&git, &options, &mut out)?;
        }
    }
    Ok(())
}

fn cmd_init<W: Write>(path: &Path, force: bool, out: &mut W) -> Result<()> {
    if init_config(path, force)? {
        writeln!(out, "Wrote default config to {}", path.display())?;
    } else {
        writeln!(
            out,
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )?;
    }
    Ok(())
}
