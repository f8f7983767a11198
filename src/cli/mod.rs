//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

pub mod commands;
pub mod output;

/// Skillcat - author, audit and cross-link a tiered skill catalogue
#[derive(Parser, Debug)]
#[command(name = "skillcat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (human, json, plain)
    #[arg(long, short = 'O', global = true, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Enable machine-readable JSON output (shorthand for --output-format=json)
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output; reports and errors are still printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/skillcat/config.toml, then ./skillcat.toml)
    #[arg(long, global = true, env = "SKILLCAT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Whether logs should be emitted as JSON.
    #[must_use]
    pub fn machine_logs(&self) -> bool {
        self.machine || self.output_format == Some(OutputFormat::Json)
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the skill dataset from the authoring catalogue
    Build(commands::build::BuildArgs),

    /// Check skill descriptions against their structured fields
    Audit(commands::audit::AuditArgs),

    /// Resolve every unit's skill reference against the dataset
    Link(commands::link::LinkArgs),

    /// Check that each effect carries the parameters it needs
    Lint(commands::lint::LintArgs),

    /// Compare two skill datasets that declare the same skills
    Reconcile(commands::reconcile::ReconcileArgs),
}
