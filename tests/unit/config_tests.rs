use std::path::PathBuf;

use skillcat::CatalogError;
use skillcat::audit::TierPolicy;
use skillcat::config::Config;
use skillcat::test_utils::fixtures::CatalogFixture;

#[test]
fn explicit_config_sets_every_section() {
    let fixture = CatalogFixture::new();
    let path = fixture.create_file(
        "conf/skillcat.toml",
        r#"
[paths]
skills = "build/skills.csv"
units = "build/units.csv"
catalogue = "authoring/skills.toml"
report = "reports/audit.txt"

[audit]
tier_policy = "uniform"
flag_unmentioned = true

[output]
format = "plain"
color = false
"#,
    );

    let config = Config::load(Some(&path), &fixture.root).unwrap();
    assert_eq!(config.paths.skills, PathBuf::from("build/skills.csv"));
    assert_eq!(config.paths.units, PathBuf::from("build/units.csv"));
    assert_eq!(config.paths.catalogue, PathBuf::from("authoring/skills.toml"));
    assert_eq!(config.paths.report, Some(PathBuf::from("reports/audit.txt")));
    assert_eq!(config.audit.tier_policy, TierPolicy::Uniform);
    assert!(config.audit.flag_unmentioned);
    assert_eq!(config.output.format, "plain");
    assert!(!config.output.color);
}

#[test]
fn explicit_config_replaces_project_file() {
    let fixture = CatalogFixture::new();
    fixture.create_file("skillcat.toml", "[paths]\nunits = \"project/units.csv\"\n");
    let path = fixture.create_file("other.toml", "[paths]\nskills = \"other/skills.csv\"\n");

    let config = Config::load(Some(&path), &fixture.root).unwrap();
    assert_eq!(config.paths.skills, PathBuf::from("other/skills.csv"));
    assert_eq!(config.paths.units, PathBuf::from("data/units.csv"));
}

#[test]
fn syntax_errors_name_the_file() {
    let fixture = CatalogFixture::new();
    let path = fixture.create_file("broken.toml", "[paths\nskills = 1\n");
    match Config::load(Some(&path), &fixture.root).unwrap_err() {
        CatalogError::Config(message) => assert!(message.contains("broken.toml")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn config_serializes_back_to_toml() {
    let config = Config::default();
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("[paths]"));
    assert!(text.contains("tier_policy = \"baseline\""));
    let parsed: Config = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}
