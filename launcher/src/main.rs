use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use branchdiff::exit_codes;
use branchdiff::io::config::resolve_config;
use branchdiff::logging;
use clap::{Parser, ValueHint};
use launcher::input::{UnbufferedReader, raw_stdin};
use launcher::runner::SystemRunner;
use launcher::session::run_session;

#[derive(Parser, Debug)]
#[command(
    name = "branchdiff-launch",
    version,
    about = "Check the environment, then pick a branch diff tool from a menu"
)]
struct Cli {
    /// Config file (defaults to .branchdiff/config.toml).
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Exit without waiting for Enter.
    #[arg(long)]
    no_pause: bool,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let mut config = resolve_config(cli.config.as_deref(), &cwd)?.launcher;
    if cli.no_pause {
        config.pause_on_exit = false;
    }
    let runner = SystemRunner {
        output_limit_bytes: config.probe_output_limit_bytes,
    };
    let mut input = UnbufferedReader::new(raw_stdin().context("open stdin")?);
    let mut out = io::stdout().lock();
    run_session(&config, &runner, &mut input, &mut out)
}
