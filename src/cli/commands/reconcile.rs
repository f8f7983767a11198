//! skillcat reconcile - Compare two skill datasets

use std::path::PathBuf;

use clap::Args;

use super::{check_strict, emit_report};
use crate::app::AppContext;
use crate::dataset::read_skills;
use crate::error::Result;
use crate::reconcile::reconcile;
use crate::report::render_reconcile;

#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// First dataset
    pub left: PathBuf,

    /// Second dataset
    pub right: PathBuf,

    /// Exit non-zero when the sources differ
    #[arg(long)]
    pub strict: bool,
}

pub fn run(ctx: &AppContext, args: &ReconcileArgs) -> Result<()> {
    let left = read_skills(&args.left)?;
    let right = read_skills(&args.right)?;
    let report = reconcile(&left, &right);

    emit_report(ctx, &report, &render_reconcile(&report), &[])?;
    check_strict(args.strict, report.finding_count())
}
