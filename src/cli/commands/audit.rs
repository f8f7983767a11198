//! skillcat audit - Check descriptions against structured fields

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tracing::info;

use super::{check_strict, emit_report, load_registry};
use crate::app::AppContext;
use crate::audit::{AuditReport, ConsistencyAuditor, TierPolicy};
use crate::dataset::{read_roster, write_text};
use crate::error::Result;
use crate::linker::{LinkReport, link};
use crate::report::{render_audit, render_link, render_review_sheet};

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Skill dataset to audit (default: paths.skills)
    #[arg(long)]
    pub skills: Option<PathBuf>,

    /// Audit only this skill id (repeatable)
    #[arg(long = "skill", value_name = "ID")]
    pub only: Vec<String>,

    /// Unit roster; when given, the link report is appended
    #[arg(long)]
    pub units: Option<PathBuf>,

    /// Which tiers must match the structured fields
    #[arg(long, value_enum)]
    pub tier_policy: Option<TierPolicy>,

    /// Also report binding tiers that never mention an audited quantity
    #[arg(long)]
    pub flag_unmentioned: bool,

    /// Append the per-skill review sheet
    #[arg(long)]
    pub sheet: bool,

    /// Also write the text report to this file (default: paths.report)
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit non-zero when discrepancies or unresolved references are found
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
pub struct AuditOutput {
    pub audit: AuditReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl AuditOutput {
    fn finding_count(&self) -> usize {
        self.audit.discrepancies.len()
            + self.link.as_ref().map_or(0, LinkReport::unresolved_count)
    }
}

pub fn run(ctx: &AppContext, args: &AuditArgs) -> Result<()> {
    let skills = args.skills.as_deref().unwrap_or(ctx.skills_path());
    let registry = load_registry(skills)?;

    let mut policy = ctx.audit_policy();
    if let Some(tier_policy) = args.tier_policy {
        policy.tier_policy = tier_policy;
    }
    policy.flag_unmentioned |= args.flag_unmentioned;

    let auditor = ConsistencyAuditor::new(policy);
    let audit = if args.only.is_empty() {
        auditor.audit(&registry)
    } else {
        let selected = args
            .only
            .iter()
            .map(|id| registry.require(id))
            .collect::<Result<Vec<_>>>()?;
        auditor.audit_skills(selected)
    };

    let mut warnings = Vec::new();
    let link = match &args.units {
        Some(units) => {
            let roster = read_roster(units)?;
            warnings.extend(roster.skipped.iter().map(ToString::to_string));
            Some(link(&roster.units, &registry))
        }
        None => None,
    };

    let mut text = render_audit(&audit);
    if args.sheet {
        text.push('\n');
        text.push_str(&render_review_sheet(&registry));
    }
    if let Some(link) = &link {
        text.push('\n');
        text.push_str(&render_link(link));
    }

    let report_path = args.report.clone().or_else(|| ctx.config.paths.report.clone());
    if let Some(path) = &report_path {
        write_text(path, &text)?;
        info!(path = %path.display(), "wrote audit report");
    }

    let output = AuditOutput {
        audit,
        link,
        report_path,
    };
    emit_report(ctx, &output, &text, &warnings)?;
    check_strict(args.strict, output.finding_count())
}
