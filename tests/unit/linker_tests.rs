use skillcat::dataset::roster;
use skillcat::linker::{MISSING, Resolution, SkillSummary, link};
use skillcat::registry::Role;
use skillcat::test_utils::fixtures::{SAMPLE_ROSTER, sample_registry};

#[test]
fn sample_roster_links_with_one_unresolved() {
    let roster = roster::from_csv(SAMPLE_ROSTER).unwrap();
    let report = link(&roster.units, &sample_registry());

    assert_eq!(report.len(), 4);
    assert_eq!(report.resolved_count(), 3);
    let unresolved: Vec<(Role, &str)> = report
        .unresolved()
        .map(|(role, entry)| (role, entry.skill_id.as_str()))
        .collect();
    assert_eq!(unresolved, [(Role::Archer, "arrow_storm")]);

    let roles: Vec<Role> = report.sections.iter().map(|s| s.role).collect();
    assert_eq!(roles, [Role::Tanker, Role::Mage, Role::Archer, Role::Support]);
}

#[test]
fn resolved_entries_summarize_damage_fields() {
    let roster = roster::from_csv(SAMPLE_ROSTER).unwrap();
    let report = link(&roster.units, &sample_registry());

    let (_, fox) = report.entries().find(|(_, e)| e.unit_id == "fox").unwrap();
    assert_eq!(
        fox.resolution,
        Resolution::Resolved(SkillSummary {
            base: "20".into(),
            scale: "1.4".into(),
            damage_type: "magic".into(),
        })
    );
    assert_eq!(fox.effect.as_deref(), Some("row_multi"));

    let (_, bear) = report.entries().find(|(_, e)| e.unit_id == "bear").unwrap();
    match &bear.resolution {
        Resolution::Resolved(summary) => {
            assert_eq!(summary.base, MISSING);
            assert_eq!(summary.damage_type, MISSING);
        }
        Resolution::Unresolved => panic!("bear_roar should resolve"),
    }
}

#[test]
fn unresolved_entries_serialize_with_status() {
    let roster = roster::from_csv(SAMPLE_ROSTER).unwrap();
    let report = link(&roster.units, &sample_registry());
    let json = serde_json::to_value(&report).unwrap();
    let archer = &json["sections"][2];
    assert_eq!(archer["role"], "archer");
    assert_eq!(archer["entries"][0]["resolution"]["status"], "unresolved");
    assert!(archer["entries"][0].get("effect").is_none());
}

#[test]
fn empty_roster_links_to_empty_report() {
    let report = link(&[], &sample_registry());
    assert!(report.is_empty());
    assert!(report.sections.is_empty());
    assert!(report.shared_effects().is_empty());
}
