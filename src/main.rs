//! Lahman wrangle CLI.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use lahman_wrangle::cli::Cli;
use lahman_wrangle::logging::{LogConfig, init_logging};
use lahman_wrangle::wrangle::WRANGLE_STEPS;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&LogConfig::from_verbose(cli.verbose)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let paths = cli.paths();
    for step in WRANGLE_STEPS {
        step.run(&paths)
            .with_context(|| format!("failed to wrangle {}", step.source_file()))?;
    }
    Ok(())
}
