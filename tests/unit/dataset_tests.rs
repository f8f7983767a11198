use serde_json::json;
use skillcat::CatalogError;
use skillcat::dataset::{catalogue, csv, read_catalogue, read_skills, skills, write_skills};
use skillcat::error::ErrorCode;
use skillcat::registry::{Role, SkillRegistry};
use skillcat::schema::{Column, make_record};
use skillcat::test_utils::fixtures::{CatalogFixture, SAMPLE_CATALOGUE};

#[test]
fn catalogue_builds_and_exports_through_the_dataset_file() {
    let fixture = CatalogFixture::with_samples();
    let catalogue = read_catalogue(&fixture.path("data/skills.toml")).unwrap();
    assert_eq!(catalogue.len(), 4);

    let mut registry = catalogue.build().unwrap();
    let records = registry.export_all();
    let out = fixture.path("out/skills.csv");
    write_skills(&out, &records).unwrap();

    let text = fixture.read("out/skills.csv");
    assert!(text.starts_with("id,name,descriptionVi,"));
    assert_eq!(text.lines().count(), 5);
    assert!(text.contains(r#""{""ratio"":0.6}""#));
    assert_eq!(read_skills(&out).unwrap(), records);
}

#[test]
fn quoted_fields_survive() {
    let record = make_record([
        ("id", "quoted"),
        ("name", "Cú, \"Đêm\""),
        ("descriptionVi", "1★ dòng một\n2★ dòng hai"),
    ])
    .unwrap();
    let text = skills::to_csv(std::slice::from_ref(&record));
    assert_eq!(skills::from_csv(&text).unwrap(), [record]);
}

#[test]
fn csv_reader_accepts_bom_and_crlf() {
    let table = csv::parse("\u{feff}id,name\r\nbear,\"Gấu\r\nLớn\"\r\n\r\nfox,Cáo\r\n").unwrap();
    assert_eq!(table.header, ["id", "name"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0].fields, ["bear", "Gấu\r\nLớn"]);
    assert_eq!(table.rows[1].line, 5);
}

#[test]
fn csv_reader_reports_unterminated_quotes() {
    let err = csv::parse("id,name\nbear,\"Gấu\n").unwrap_err();
    assert!(matches!(err, CatalogError::Dataset(ref m) if m.contains("line 2")));
    assert!(matches!(csv::parse(""), Err(CatalogError::Dataset(_))));
}

#[test]
fn dataset_columns_are_read_by_name() {
    let text = "turns,id,name\n3,bear_roar,Gầm\n";
    let records = skills::from_csv(text).unwrap();
    assert_eq!(records[0].id(), "bear_roar");
    assert_eq!(records[0].get(Column::Turns), Some("3"));
    assert_eq!(records[0].get(Column::Effect), None);
}

#[test]
fn unknown_dataset_columns_are_rejected() {
    let err = skills::from_csv("id,tunrs\nbear,3\n").unwrap_err();
    match err {
        CatalogError::UnknownColumns { columns, .. } => assert_eq!(columns, ["tunrs"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn sample_catalogue_parses_in_role_order() {
    let catalogue = catalogue::from_toml(SAMPLE_CATALOGUE).unwrap();
    let roles: Vec<Role> = catalogue.collections.iter().map(|(role, _)| *role).collect();
    assert_eq!(roles, [Role::Tanker, Role::Mage, Role::Archer, Role::Support]);
}

#[test]
fn missing_dataset_file_names_the_path() {
    let fixture = CatalogFixture::new();
    let err = read_skills(&fixture.path("nope.csv")).unwrap_err();
    assert!(matches!(err, CatalogError::Io(_)));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn every_skill_with_an_unknown_field_is_named() {
    let fixture = CatalogFixture::new();
    fixture.create_file(
        "data/skills.toml",
        "[[tanker]]\nid = \"a\"\ntunrs = 2\n\n[[mage]]\nid = \"b\"\nmaxTarget = 1\n\n[[archer]]\nid = \"fine\"\n",
    );
    let err = read_catalogue(&fixture.path("data/skills.toml")).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnknownColumn);

    let message = err.to_string();
    assert!(message.starts_with("2 schema violation(s)"), "{message}");
    assert!(message.contains("skill 'a': tunrs"));
    assert!(message.contains("skill 'b': maxTarget"));

    let context = err.context().unwrap();
    assert_eq!(context["skill_ids"], json!(["a", "b"]));
    assert_eq!(context["columns"], json!(["tunrs", "maxTarget"]));
}

#[test]
fn every_invalid_dataset_value_is_named() {
    let records = skills::from_csv("id,turns,stunChance\na,three,\nfine,2,\nb,,high\n").unwrap();
    let err = SkillRegistry::import(records).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidFieldValue);
    assert_eq!(err.context().unwrap()["skill_ids"], json!(["a", "b"]));

    let structured = err.to_structured();
    assert!(structured.suggestion.starts_with("Skills to fix: a, b"));
}
