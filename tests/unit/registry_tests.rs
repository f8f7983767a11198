use skillcat::CatalogError;
use skillcat::registry::{
    ActionPattern, DamageType, Role, ScaleStat, SkillDefinition, SkillRegistry,
    verify_no_duplicates,
};
use skillcat::schema::{Column, make_record};
use skillcat::test_utils::fixtures::sample_registry;

#[test]
fn sample_registry_follows_role_order() {
    let registry = sample_registry();
    let ids: Vec<&str> = registry.ids().collect();
    assert_eq!(ids, ["bear_roar", "fireball", "volley", "healing_rain"]);
    assert_eq!(registry.role_of("volley"), Some(Role::Archer));
    assert_eq!(registry.role_of("missing"), None);
}

#[test]
fn typed_accessors_expose_structured_fields() {
    let registry = sample_registry();
    let fireball = registry.get("fireball").unwrap();
    assert_eq!(fireball.action_pattern(), Some(ActionPattern::RangedStatic));
    assert_eq!(fireball.damage_type(), Some(DamageType::Magic));
    assert_eq!(fireball.scale_stat(), Some(ScaleStat::Matk));
    assert_eq!(fireball.number(Column::Scale), Some(1.4));
    assert_eq!(fireball.number(Column::Turns), None);

    let volley = registry.get("volley").unwrap();
    let hit1 = volley.document(Column::Hit1).unwrap();
    assert_eq!(hit1["ratio"], 0.6);
    assert!(volley.document(Column::Hit2).is_none());
}

#[test]
fn unset_parameters_are_absent_not_zero() {
    let skill = SkillDefinition::from_record(make_record([("id", "bare")]).unwrap()).unwrap();
    for column in Column::ALL.iter().filter(|c| **c != Column::Id) {
        assert_eq!(skill.raw(*column), None, "{column} should be unset");
        assert_eq!(skill.number(*column), None);
    }
    assert_eq!(skill.damage_type(), None);
}

#[test]
fn invalid_values_are_schema_violations() {
    for (column, value) in [
        ("turns", "three"),
        ("actionPattern", "FLYING"),
        ("damageType", "fire"),
        ("buffStats", "{atk:"),
    ] {
        let record = make_record([("id", "broken"), (column, value)]).unwrap();
        let err = SkillDefinition::from_record(record).unwrap_err();
        assert!(err.is_schema_violation(), "{column}={value}");
        assert!(matches!(err, CatalogError::InvalidValue { .. }));
    }
}

#[test]
fn verify_no_duplicates_lists_every_duplicate() {
    let records: Vec<_> = ["b", "a", "b", "c", "a", "b"]
        .into_iter()
        .map(|id| make_record([("id", id)]).unwrap())
        .collect();
    match verify_no_duplicates(&records).unwrap_err() {
        CatalogError::DuplicateIds { ids } => assert_eq!(ids, ["a", "b"]),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(SkillRegistry::import(records).is_err());
}

#[test]
fn builder_rejects_duplicates_across_roles_before_registering() {
    let err = SkillRegistry::builder()
        .collection(Role::Mage, [make_record([("id", "spark")]).unwrap()])
        .collection(Role::Support, [make_record([("id", "spark")]).unwrap()])
        .build()
        .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateIds { ref ids } if ids == &["spark"]));
}

#[test]
fn export_then_import_preserves_every_field() {
    let mut registry = sample_registry();
    let exported = registry.export_all();
    let reimported = SkillRegistry::import(exported.clone()).unwrap();
    assert_eq!(reimported.len(), exported.len());
    for (record, skill) in exported.iter().zip(reimported.iter()) {
        assert_eq!(record, skill.record());
    }
}
