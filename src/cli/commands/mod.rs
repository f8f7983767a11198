//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use std::path::Path;

use serde::Serialize;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::cli::output::{OutputFormat, emit_formatted, emit_json, highlight, robot_ok};
use crate::dataset::read_skills;
use crate::error::{CatalogError, Result};
use crate::registry::SkillRegistry;

pub mod audit;
pub mod build;
pub mod link;
pub mod lint;
pub mod reconcile;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Build(args) => build::run(ctx, args),
        Commands::Audit(args) => audit::run(ctx, args),
        Commands::Link(args) => link::run(ctx, args),
        Commands::Lint(args) => lint::run(ctx, args),
        Commands::Reconcile(args) => reconcile::run(ctx, args),
    }
}

/// Read a skill dataset and register every record.
pub(crate) fn load_registry(path: &Path) -> Result<SkillRegistry> {
    SkillRegistry::import(read_skills(path)?)
}

/// Print a report: rendered text for people, the serialized value for machines.
///
/// Warnings go into the robot envelope, or below the text otherwise.
pub(crate) fn emit_report<T: Serialize>(
    ctx: &AppContext,
    value: &T,
    text: &str,
    warnings: &[String],
) -> Result<()> {
    if ctx.output_format == OutputFormat::Json {
        return emit_json(&robot_ok(value).with_warnings(warnings.to_vec()));
    }

    let mut text = text.trim_end().to_string();
    for warning in warnings {
        text.push_str(&format!("\nwarning: {warning}"));
    }
    emit_formatted(
        value,
        ctx.output_format,
        |_| highlight(&text),
        |_| text.clone(),
    )
}

/// Turn findings into a failure when `--strict` is set.
pub(crate) fn check_strict(strict: bool, findings: usize) -> Result<()> {
    if strict && findings > 0 {
        Err(CatalogError::Findings(findings))
    } else {
        Ok(())
    }
}
