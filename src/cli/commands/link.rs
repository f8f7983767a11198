//! skillcat link - Resolve unit skill references

use std::path::PathBuf;

use clap::Args;

use super::{check_strict, emit_report, load_registry};
use crate::app::AppContext;
use crate::dataset::read_roster;
use crate::error::Result;
use crate::linker::link;
use crate::report::render_link;

#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Skill dataset (default: paths.skills)
    #[arg(long)]
    pub skills: Option<PathBuf>,

    /// Unit roster (default: paths.units)
    #[arg(long)]
    pub units: Option<PathBuf>,

    /// Exit non-zero when any reference is unresolved
    #[arg(long)]
    pub strict: bool,
}

pub fn run(ctx: &AppContext, args: &LinkArgs) -> Result<()> {
    let registry = load_registry(args.skills.as_deref().unwrap_or(ctx.skills_path()))?;
    let roster = read_roster(args.units.as_deref().unwrap_or(ctx.units_path()))?;

    let report = link(&roster.units, &registry);
    let warnings: Vec<String> = roster.skipped.iter().map(ToString::to_string).collect();

    emit_report(ctx, &report, &render_link(&report), &warnings)?;
    check_strict(args.strict, report.unresolved_count())
}
