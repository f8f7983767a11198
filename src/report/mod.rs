//! Plain-text renderings of the review reports.
//!
//! Output is UTF-8 and uncoloured so it can be written straight to a report
//! file; the CLI adds styling on top when printing to a terminal.

use crate::audit::auditor::{AUDITED_TIERS, format_number};
use crate::audit::{AuditReport, LintReport, Severity};
use crate::description::split_by_tier;
use crate::linker::{LinkReport, Resolution};
use crate::reconcile::{ReconcileReport, SkillDivergence};
use crate::registry::SkillRegistry;
use crate::schema::Column;

const RULE_WIDTH: usize = 72;

const RESOLVED_MARK: &str = "✅";
const UNRESOLVED_MARK: &str = "❌";

struct Lines(Vec<String>);

impl Lines {
    fn new() -> Self {
        Self(Vec::new())
    }

    fn push(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn blank(&mut self) {
        self.0.push(String::new());
    }

    fn rule(&mut self, c: char) {
        self.0.push(c.to_string().repeat(RULE_WIDTH));
    }

    fn finish(self) -> String {
        let mut text = self.0.join("\n");
        text.push('\n');
        text
    }
}

fn list(values: &[u32]) -> String {
    let items: Vec<String> = values.iter().map(u32::to_string).collect();
    format!("[{}]", items.join(", "))
}

pub fn render_audit(report: &AuditReport) -> String {
    let mut out = Lines::new();
    out.push(format!(
        "AUDIT: descriptions vs structured fields (tier policy: {})",
        report.policy.tier_policy
    ));
    out.push(format!(
        "skills audited: {}  discrepancies: {}  parse gaps: {}  tier notes: {}",
        report.skills_audited,
        report.discrepancies.len(),
        report.parse_gaps.len(),
        report.tier_notes.len()
    ));

    if report.discrepancies.is_empty() {
        out.blank();
        out.push("No discrepancies.");
    }
    for (skill_id, discrepancies) in report.by_skill() {
        out.blank();
        out.push(skill_id);
        for d in discrepancies {
            out.push(format!(
                "  *{} {}: field {} (looks for {}), text {} - {}",
                d.tier,
                d.field,
                d.structured,
                format_number(d.expected),
                list(&d.extracted),
                d.note
            ));
        }
    }

    if !report.parse_gaps.is_empty() {
        out.blank();
        out.push("Parse gaps");
        for gap in &report.parse_gaps {
            match gap.tier {
                Some(tier) => out.push(format!("  {} *{tier}: {}", gap.skill_id, gap.reason)),
                None => out.push(format!("  {}: {}", gap.skill_id, gap.reason)),
            }
        }
    }

    if !report.tier_notes.is_empty() {
        out.blank();
        out.push("Tier notes (higher-tier text differs from the tier-1 field)");
        for note in &report.tier_notes {
            out.push(format!(
                "  {} *{} {}: field {}, text {}",
                note.skill_id,
                note.tier,
                note.field,
                note.structured,
                list(&note.extracted)
            ));
        }
    }

    out.finish()
}

/// Side-by-side sheet of each skill's key fields and tier text.
pub fn render_review_sheet(registry: &SkillRegistry) -> String {
    let mut out = Lines::new();
    out.rule('=');
    out.push("REVIEW: skill tier descriptions");
    out.rule('=');

    let field = |skill: &crate::registry::SkillDefinition, column| {
        skill.raw(column).unwrap_or_default().to_string()
    };
    for skill in registry {
        let tiers = split_by_tier(skill.description());
        if tiers.is_empty() {
            continue;
        }
        out.blank();
        out.rule('_');
        out.push(format!(
            "{} (effect: {})",
            skill.id(),
            skill.effect().unwrap_or_default()
        ));
        out.push(format!(
            "  CSV: base={} scale={} turns={} maxT={} maxH={}",
            field(skill, Column::Base),
            field(skill, Column::Scale),
            field(skill, Column::Turns),
            field(skill, Column::MaxTargets),
            field(skill, Column::MaxHits)
        ));
        for tier in AUDITED_TIERS {
            if let Some(text) = tiers.get(tier) {
                out.push(format!("  *{tier}: {text}"));
            }
        }
    }

    out.finish()
}

pub fn render_link(report: &LinkReport) -> String {
    let mut out = Lines::new();
    for (i, section) in report.sections.iter().enumerate() {
        if i > 0 {
            out.blank();
        }
        out.push(format!("=== {} ===", section.role));
        for entry in &section.entries {
            let (mark, detail) = match &entry.resolution {
                Resolution::Resolved(summary) => (
                    RESOLVED_MARK,
                    format!(
                        "base={} scale={} type={}",
                        summary.base, summary.scale, summary.damage_type
                    ),
                ),
                Resolution::Unresolved => (UNRESOLVED_MARK, "NOT FOUND".to_string()),
            };
            out.push(format!(
                "  T{} {:25} {mark} {:35} {detail}",
                entry.tier, entry.unit_id, entry.skill_id
            ));
        }
    }

    if !report.is_empty() {
        out.blank();
    }
    out.push(format!(
        "units: {}  resolved: {}  unresolved: {}",
        report.len(),
        report.resolved_count(),
        report.unresolved_count()
    ));

    let shared = report.shared_effects();
    if !shared.is_empty() {
        out.blank();
        out.push("Effects shared by several skills");
        for (effect, skills) in shared {
            out.push(format!("  {effect}: {}", skills.join(", ")));
        }
    }

    out.finish()
}

pub fn render_lint(report: &LintReport) -> String {
    let mut out = Lines::new();
    out.rule('=');
    out.push(format!(
        "LINT: {} skills checked",
        report.skills_checked
    ));
    out.rule('=');

    if report.is_clean() {
        out.push("No issues found.");
        return out.finish();
    }

    for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
        let findings: Vec<_> = report.with_severity(severity).collect();
        if findings.is_empty() {
            continue;
        }
        out.blank();
        out.push(format!("{} ({})", severity.to_string().to_uppercase(), findings.len()));
        out.rule('-');
        for finding in findings {
            out.push(format!("  {}: {}", finding.skill_id, finding.message));
        }
    }

    out.blank();
    out.push(format!(
        "total: {} finding(s) ({} critical, {} warning, {} info)",
        report.findings.len(),
        report.count(Severity::Critical),
        report.count(Severity::Warning),
        report.count(Severity::Info)
    ));
    out.finish()
}

fn push_columns(out: &mut Lines, divergence: &SkillDivergence) {
    for column in &divergence.columns {
        out.push(format!("  {} [{}]", column.column, column.kind));
        out.push(format!("    < {}", column.left));
        out.push(format!("    > {}", column.right));
    }
}

pub fn render_reconcile(report: &ReconcileReport) -> String {
    let mut out = Lines::new();
    out.push(format!(
        "RECONCILE: {} shared skill(s), {} divergent, {} left-only, {} right-only, {} repeated",
        report.compared,
        report.divergent.len(),
        report.only_left.len(),
        report.only_right.len(),
        report.repeated_left.len() + report.repeated_right.len()
    ));

    for divergence in &report.divergent {
        out.blank();
        out.push(divergence.skill_id.as_str());
        push_columns(&mut out, divergence);
    }

    for (side, repeats) in [("left", &report.repeated_left), ("right", &report.repeated_right)] {
        for repeat in repeats {
            out.blank();
            out.push(format!("{} (declared again in {side})", repeat.skill_id));
            if repeat.columns.is_empty() {
                out.push("  identical copy");
            }
            push_columns(&mut out, repeat);
        }
    }

    if !report.only_left.is_empty() {
        out.blank();
        out.push(format!("Only in left: {}", report.only_left.join(", ")));
    }
    if !report.only_right.is_empty() {
        out.blank();
        out.push(format!("Only in right: {}", report.only_right.join(", ")));
    }

    out.finish()
}
