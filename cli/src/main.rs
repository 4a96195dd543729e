//! catalint CLI entrypoint.
//!
//! Validates every package in a catalog and exits 0 when all pass, 1 when any
//! fail, and 2 when the run cannot complete.

use camino::{Utf8Path, Utf8PathBuf};
use catalint::{LintConfig, PackageValidator};
use catalint_cli::catalog::{Report, run_catalog};
use catalint_cli::cli::Cli;
use catalint_cli::error::{CliError, Result};
use catalint_cli::jsonl;
use clap::Parser;
use log::debug;
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stdout);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stdout: &mut dyn Write) -> Result<Report> {
    let cwd = current_dir()?;
    let config = load_config(cli, &cwd)?;
    let validator = PackageValidator::from_config(&config)?;
    debug!("rules: {:?}", validator.registry().names());

    let report = run_catalog(&cli.root, &validator, stdout)?;
    stdout.flush()?;

    if let Some(path) = &cli.jsonl {
        jsonl::write_file(path, &report)?;
    }

    Ok(report)
}

/// Loads the explicit `--config` file, or discovers one in `cwd`.
fn load_config(cli: &Cli, cwd: &Utf8Path) -> Result<LintConfig> {
    let config = match &cli.config {
        Some(path) => LintConfig::load(path)?,
        None => LintConfig::discover(cwd)?,
    };
    Ok(config)
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().map_err(|err| CliError::CurrentDir {
        reason: err.to_string(),
    })?;
    Utf8PathBuf::try_from(cwd).map_err(|err| CliError::CurrentDir {
        reason: format!("path is not valid UTF-8: {err}"),
    })
}

fn exit_code_for_run_result(result: Result<Report>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(report) if report.is_success() => 0,
        Ok(_) => 1,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            2
        }
    }
}

fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}
