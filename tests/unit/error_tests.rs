use std::collections::HashSet;

use skillcat::CatalogError;
use skillcat::error::{ErrorCode, suggest_similar_columns};
use skillcat::schema::{Column, make_record};

#[test]
fn numeric_codes_are_unique_and_categorized() {
    let codes: Vec<ErrorCode> = ErrorCode::all().collect();
    let numerics: HashSet<u16> = codes.iter().map(ErrorCode::numeric).collect();
    assert_eq!(numerics.len(), codes.len());
    for code in codes {
        assert_ne!(code.category(), "unknown", "{code:?}");
        assert!(!code.suggestion().is_empty());
        assert!(code.code_string().starts_with('E'));
    }
}

#[test]
fn unknown_override_keys_get_column_hints() {
    let err = make_record([("id", "bear_roar"), ("tunrs", "3"), ("maxTarget", "1")]).unwrap_err();
    let structured = err.to_structured();
    assert_eq!(structured.code, ErrorCode::UnknownColumn);
    assert!(structured.suggestion.contains("'tunrs' (did you mean 'turns'?)"));
    assert!(structured.suggestion.contains("'maxTarget' (did you mean 'maxTargets'?)"));
}

#[test]
fn similar_columns_are_ranked_by_distance() {
    let names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
    assert_eq!(suggest_similar_columns("stunchance", &names, 1), ["stunChance"]);
    assert!(suggest_similar_columns("completelyunrelated", &names, 3).is_empty());
}

#[test]
fn findings_error_is_an_audit_outcome() {
    let err = CatalogError::Findings(4);
    assert_eq!(err.code(), ErrorCode::FindingsReported);
    assert_eq!(err.code().category(), "audit");
    assert!(!err.is_schema_violation());
    assert!(err.to_string().contains('4'));
}
