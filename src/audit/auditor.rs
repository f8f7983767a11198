use tracing::{debug, info};

use super::{AuditPolicy, AuditReport, Discrepancy, GapReason, ParseGap, TierNote, TierPolicy};
use crate::description::{ExtractedFeature, extract_features, split_by_tier};
use crate::registry::{SkillDefinition, SkillRegistry};
use crate::schema::Column;

/// Star levels a description is expected to describe.
pub const AUDITED_TIERS: [u8; 3] = [1, 2, 3];

/// How a field value is located in the extracted features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Claim {
    Turns,
    Targets,
    Percent,
}

impl Claim {
    fn of(column: Column) -> Option<Self> {
        if Column::DURATIONS.contains(&column) {
            Some(Claim::Turns)
        } else if column == Column::MaxTargets {
            Some(Claim::Targets)
        } else if Column::RATIOS.contains(&column) {
            Some(Claim::Percent)
        } else {
            None
        }
    }

    fn values(self, features: &ExtractedFeature) -> &[u32] {
        match self {
            Claim::Turns => &features.turns,
            Claim::Targets => &features.targets,
            Claim::Percent => &features.percentages,
        }
    }

    /// The number the text should mention for a stored value.
    fn expected(self, stored: f64) -> f64 {
        match self {
            Claim::Percent => (stored * 100.0).round(),
            Claim::Turns | Claim::Targets => stored,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Claim::Turns => "turn durations",
            Claim::Targets => "target counts",
            Claim::Percent => "percentages",
        }
    }
}

#[derive(Debug, PartialEq)]
enum Outcome {
    Agrees,
    Unmentioned,
    Disagrees,
}

fn compare(expected: f64, extracted: &[u32]) -> Outcome {
    if extracted.is_empty() {
        Outcome::Unmentioned
    } else if extracted
        .iter()
        .any(|&value| (f64::from(value) - expected).abs() < f64::EPSILON)
    {
        Outcome::Agrees
    } else {
        Outcome::Disagrees
    }
}

/// Cross-checks each skill's fields against its own tier text.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyAuditor {
    policy: AuditPolicy,
}

impl ConsistencyAuditor {
    pub fn new(policy: AuditPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AuditPolicy {
        self.policy
    }

    /// Audit every skill in registry order.
    pub fn audit(&self, registry: &SkillRegistry) -> AuditReport {
        self.audit_skills(registry)
    }

    /// Audit a selection of skills, in the order given.
    pub fn audit_skills<'a, I>(&self, skills: I) -> AuditReport
    where
        I: IntoIterator<Item = &'a SkillDefinition>,
    {
        let mut report = AuditReport::new(self.policy);
        for skill in skills {
            self.audit_skill(skill, &mut report);
        }
        info!(
            skills = report.skills_audited,
            discrepancies = report.discrepancies.len(),
            gaps = report.parse_gaps.len(),
            notes = report.tier_notes.len(),
            "audit pass complete"
        );
        report
    }

    /// Audit one skill, appending its findings to `report`.
    pub fn audit_skill(&self, skill: &SkillDefinition, report: &mut AuditReport) {
        let id = skill.id();
        if skill.description().trim().is_empty() {
            report.parse_gaps.push(gap(id, None, GapReason::EmptyDescription));
            return;
        }

        let tiers = split_by_tier(skill.description());
        if tiers.is_empty() {
            debug!(skill = id, "description has no tier markup");
            report.parse_gaps.push(gap(id, None, GapReason::NoTierMarkup));
            return;
        }

        report.skills_audited += 1;
        for tier in AUDITED_TIERS {
            let Some(text) = tiers.get(tier) else {
                report.parse_gaps.push(gap(id, Some(tier), GapReason::MissingTier));
                continue;
            };
            let features = extract_features(text);
            self.compare_tier(skill, tier, &features, report);
        }
    }

    fn compare_tier(
        &self,
        skill: &SkillDefinition,
        tier: u8,
        features: &ExtractedFeature,
        report: &mut AuditReport,
    ) {
        let binding = tier == 1 || self.policy.tier_policy == TierPolicy::Uniform;

        for column in Column::ALL {
            let Some(claim) = Claim::of(column) else {
                continue;
            };
            let Some(stored) = skill.number(column) else {
                continue;
            };
            let expected = claim.expected(stored);
            let extracted = claim.values(features);
            let structured = skill.raw(column).unwrap_or_default().to_string();

            match compare(expected, extracted) {
                Outcome::Agrees => {}
                Outcome::Unmentioned if binding && self.policy.flag_unmentioned => {
                    report.discrepancies.push(Discrepancy {
                        skill_id: skill.id().to_string(),
                        tier,
                        field: column,
                        structured,
                        expected,
                        extracted: Vec::new(),
                        note: "not mentioned".to_string(),
                    });
                }
                Outcome::Unmentioned => {}
                Outcome::Disagrees if binding => {
                    debug!(skill = skill.id(), tier, field = %column, "field disagrees with description");
                    report.discrepancies.push(Discrepancy {
                        skill_id: skill.id().to_string(),
                        tier,
                        field: column,
                        structured,
                        expected,
                        extracted: extracted.to_vec(),
                        note: format!("{} not among extracted {}", format_number(expected), claim.label()),
                    });
                }
                Outcome::Disagrees => {
                    report.tier_notes.push(TierNote {
                        skill_id: skill.id().to_string(),
                        tier,
                        field: column,
                        structured,
                        extracted: extracted.to_vec(),
                    });
                }
            }
        }
    }
}

fn gap(skill_id: &str, tier: Option<u8>, reason: GapReason) -> ParseGap {
    ParseGap {
        skill_id: skill_id.to_string(),
        tier,
        reason,
    }
}

/// Whole numbers print without a fractional part.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
