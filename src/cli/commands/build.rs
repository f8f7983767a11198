//! skillcat build - Write the skill dataset from the authoring catalogue

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_formatted};
use crate::dataset::{read_catalogue, write_skills};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Authoring catalogue to read (default: paths.catalogue)
    #[arg(long)]
    pub catalogue: Option<PathBuf>,

    /// Dataset file to write (default: paths.skills)
    #[arg(long, short)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct BuildSummary {
    pub catalogue: PathBuf,
    pub output: PathBuf,
    pub skills: usize,
    /// Skill count per role collection.
    pub roles: BTreeMap<String, usize>,
}

pub fn run(ctx: &AppContext, args: &BuildArgs) -> Result<()> {
    let catalogue_path = args
        .catalogue
        .clone()
        .unwrap_or_else(|| ctx.config.paths.catalogue.clone());
    let output = args
        .out
        .clone()
        .unwrap_or_else(|| ctx.skills_path().to_path_buf());

    let catalogue = read_catalogue(&catalogue_path)?;
    let roles = catalogue
        .collections
        .iter()
        .map(|(role, records)| (role.as_str().to_string(), records.len()))
        .collect();

    let mut registry = catalogue.build()?;
    let records = registry.export_all();
    write_skills(&output, &records)?;

    let summary = BuildSummary {
        catalogue: catalogue_path,
        output,
        skills: records.len(),
        roles,
    };
    emit_formatted(&summary, ctx.output_format, human, plain)
}

fn human(summary: &BuildSummary) -> String {
    let mut layout = HumanLayout::new();
    layout.title(&format!(
        "{} Built {} skill(s)",
        "✓".green(),
        summary.skills
    ));
    layout
        .kv("catalogue", &summary.catalogue.display().to_string())
        .kv("dataset", &summary.output.display().to_string());
    for (role, count) in &summary.roles {
        layout.kv(role, &count.to_string());
    }
    layout.build()
}

fn plain(summary: &BuildSummary) -> String {
    let mut lines = vec![format!(
        "built {} skill(s) from {} into {}",
        summary.skills,
        summary.catalogue.display(),
        summary.output.display()
    )];
    lines.extend(
        summary
            .roles
            .iter()
            .map(|(role, count)| format!("{role}: {count}")),
    );
    lines.join("\n")
}
