use skillcat::audit::{
    AuditPolicy, ConsistencyAuditor, GapReason, Severity, TierPolicy, lint_registry,
};
use skillcat::registry::SkillRegistry;
use skillcat::schema::{Column, make_record};
use skillcat::test_utils::fixtures::sample_registry;

const SCALING_DEBUFF: &str = "1★ giảm 15%ATK 3 lượt 1 mục tiêu; 2★ giảm 20%ATK 3 lượt 2 mục tiêu; 3★ giảm 25%ATK 4 lượt 3 mục tiêu";

fn debuff_registry() -> SkillRegistry {
    SkillRegistry::import([make_record([
        ("id", "roar"),
        ("descriptionVi", SCALING_DEBUFF),
        ("turns", "3"),
        ("maxTargets", "1"),
    ])
    .unwrap()])
    .unwrap()
}

#[test]
fn baseline_policy_only_binds_tier_one() {
    let report = ConsistencyAuditor::default().audit(&debuff_registry());
    assert!(report.is_clean(), "{:?}", report.discrepancies);
    assert_eq!(report.skills_audited, 1);
    // maxTargets at tiers 2 and 3, turns at tier 3.
    assert_eq!(report.tier_notes.len(), 3);
}

#[test]
fn uniform_policy_binds_every_tier() {
    let auditor = ConsistencyAuditor::new(AuditPolicy {
        tier_policy: TierPolicy::Uniform,
        flag_unmentioned: false,
    });
    let report = auditor.audit(&debuff_registry());
    let found: Vec<(u8, Column)> = report
        .discrepancies
        .iter()
        .map(|d| (d.tier, d.field))
        .collect();
    assert_eq!(
        found,
        [
            (2, Column::MaxTargets),
            (3, Column::Turns),
            (3, Column::MaxTargets),
        ]
    );
    assert!(report.tier_notes.is_empty());
}

#[test]
fn ratio_fields_are_compared_as_percentages() {
    let registry = SkillRegistry::import([
        make_record([
            ("id", "stunner"),
            ("descriptionVi", "1★ 30% choáng 1 lượt"),
            ("stunChance", "0.30"),
            ("stunTurns", "1"),
        ])
        .unwrap(),
        make_record([
            ("id", "off_by_five"),
            ("descriptionVi", "1★ 35% choáng"),
            ("stunChance", "0.3"),
        ])
        .unwrap(),
    ])
    .unwrap();

    let report = ConsistencyAuditor::default().audit(&registry);
    assert_eq!(report.discrepancies.len(), 1);
    let d = &report.discrepancies[0];
    assert_eq!(d.skill_id, "off_by_five");
    assert_eq!(d.field, Column::StunChance);
    assert_eq!(d.expected, 30.0);
    assert_eq!(d.extracted, [35]);
    assert_eq!(d.structured, "0.3");
}

#[test]
fn unmentioned_fields_are_flagged_on_request() {
    let registry = SkillRegistry::import([make_record([
        ("id", "quiet"),
        ("descriptionVi", "1★ tăng giáp"),
        ("turns", "2"),
    ])
    .unwrap()])
    .unwrap();

    assert!(ConsistencyAuditor::default().audit(&registry).is_clean());

    let strict = ConsistencyAuditor::new(AuditPolicy {
        tier_policy: TierPolicy::Baseline,
        flag_unmentioned: true,
    });
    let report = strict.audit(&registry);
    assert_eq!(report.discrepancies.len(), 1);
    assert_eq!(report.discrepancies[0].note, "not mentioned");
    assert!(report.discrepancies[0].extracted.is_empty());
}

#[test]
fn sample_catalogue_audit() {
    let report = ConsistencyAuditor::default().audit(&sample_registry());
    assert_eq!(report.skills_audited, 3);
    assert_eq!(report.discrepancies.len(), 1);
    let d = &report.discrepancies[0];
    assert_eq!((d.skill_id.as_str(), d.tier, d.field), ("fireball", 1, Column::MaxTargets));
    assert_eq!(d.extracted, [2]);

    assert_eq!(report.parse_gaps.len(), 1);
    assert_eq!(report.parse_gaps[0].skill_id, "volley");
    assert_eq!(report.parse_gaps[0].reason, GapReason::EmptyDescription);
    assert_eq!(report.tier_notes.len(), 4);
}

#[test]
fn missing_tiers_and_markup_are_gaps() {
    let registry = SkillRegistry::import([
        make_record([("id", "partial"), ("descriptionVi", "1★ A; 3★ C")]).unwrap(),
        make_record([("id", "prose"), ("descriptionVi", "chỉ là mô tả")]).unwrap(),
    ])
    .unwrap();
    let report = ConsistencyAuditor::default().audit(&registry);
    let gaps: Vec<(&str, Option<u8>, GapReason)> = report
        .parse_gaps
        .iter()
        .map(|g| (g.skill_id.as_str(), g.tier, g.reason))
        .collect();
    assert_eq!(
        gaps,
        [
            ("partial", Some(2), GapReason::MissingTier),
            ("prose", None, GapReason::NoTierMarkup),
        ]
    );
    assert_eq!(report.skills_audited, 1);
}

#[test]
fn sample_catalogue_lint() {
    let report = lint_registry(&sample_registry());
    assert_eq!(report.skills_checked, 4);
    assert_eq!(report.findings.len(), 1, "{:?}", report.findings);
    let finding = &report.findings[0];
    assert_eq!(finding.skill_id, "volley");
    assert_eq!(finding.severity, Severity::Warning);
    assert_eq!(finding.columns, [Column::Hit2]);
}
