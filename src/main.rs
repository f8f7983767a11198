//! skillcat - skill catalogue CLI
//!
//! Build the skill dataset, audit descriptions against structured fields and
//! cross-link the unit roster.

use std::process::ExitCode;

use clap::Parser;
use console::style;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skillcat::app::AppContext;
use skillcat::cli::Cli;
use skillcat::cli::output::{emit_json, robot_error_structured};
use skillcat::{CatalogError, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    let Err(err) = run(&cli) else {
        return ExitCode::SUCCESS;
    };
    report_failure(&cli, &err);
    ExitCode::FAILURE
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    skillcat::cli::commands::run(&ctx, &cli.command)
}

/// JSON callers read the error envelope from stdout. Everyone else gets the
/// message on stderr followed by one hint line per suggestion line.
fn report_failure(cli: &Cli, err: &CatalogError) {
    if cli.machine_logs() && emit_json(&robot_error_structured(err)).is_ok() {
        return;
    }

    eprintln!("{} {err}", style("error:").for_stderr().red().bold());
    for line in err.to_structured().suggestion.lines() {
        eprintln!("  {} {line}", style("hint:").for_stderr().dim());
    }
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillcat=info",
        1 => "info,skillcat=debug",
        2 => "debug,skillcat=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    if cli.machine_logs() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}
