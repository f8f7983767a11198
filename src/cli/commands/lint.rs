//! skillcat lint - Check effect parameters for completeness

use std::path::PathBuf;

use clap::Args;

use super::{check_strict, emit_report, load_registry};
use crate::app::AppContext;
use crate::audit::{Severity, lint_registry};
use crate::error::Result;
use crate::report::render_lint;

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Skill dataset (default: paths.skills)
    #[arg(long)]
    pub skills: Option<PathBuf>,

    /// Exit non-zero when critical or warning findings exist
    #[arg(long)]
    pub strict: bool,
}

pub fn run(ctx: &AppContext, args: &LintArgs) -> Result<()> {
    let registry = load_registry(args.skills.as_deref().unwrap_or(ctx.skills_path()))?;
    let report = lint_registry(&registry);

    emit_report(ctx, &report, &render_lint(&report), &[])?;
    check_strict(
        args.strict,
        report.count(Severity::Critical) + report.count(Severity::Warning),
    )
}
