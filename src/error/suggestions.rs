//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints built
//! from the error context (offending ids, misspelled column names).

use serde_json::Value;

use super::codes::ErrorCode;
use crate::schema::Column;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::DuplicateSkillId => suggest_duplicate_ids(context),
        ErrorCode::UnknownColumn => suggest_unknown_columns(context),
        ErrorCode::InvalidFieldValue | ErrorCode::SchemaViolations => {
            suggest_for_skills(code, context)
        }
        ErrorCode::SkillNotFound => suggest_skill_not_found(context),
        ErrorCode::ConfigMissingRequired => suggest_config_missing_required(context),
        _ => code.suggestion().to_string(),
    }
}

fn string_list(context: Option<&Value>, key: &str) -> Vec<String> {
    context
        .and_then(|c| c.get(key))
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn suggest_duplicate_ids(context: Option<&Value>) -> String {
    let ids = string_list(context, "ids");
    if ids.is_empty() {
        return ErrorCode::DuplicateSkillId.suggestion().to_string();
    }
    format!(
        "Skill id(s) declared more than once: {}\nKeep one authoritative declaration per id; divergent copies belong in `skillcat reconcile`",
        ids.join(", ")
    )
}

fn suggest_unknown_columns(context: Option<&Value>) -> String {
    let columns = string_list(context, "columns");
    if columns.is_empty() {
        return ErrorCode::UnknownColumn.suggestion().to_string();
    }

    let names: Vec<&str> = Column::ALL.iter().map(|c| c.name()).collect();
    let hints: Vec<String> = columns
        .iter()
        .map(|column| match suggest_similar_columns(column, &names, 1).first() {
            Some(best) => format!("'{column}' (did you mean '{best}'?)"),
            None => format!("'{column}'"),
        })
        .collect();

    format!("Unrecognized field(s): {}", hints.join(", "))
}

fn suggest_for_skills(code: ErrorCode, context: Option<&Value>) -> String {
    let skill_ids = string_list(context, "skill_ids");
    if skill_ids.is_empty() {
        return code.suggestion().to_string();
    }
    format!("Skills to fix: {}\n{}", skill_ids.join(", "), code.suggestion())
}

fn suggest_skill_not_found(context: Option<&Value>) -> String {
    match context
        .and_then(|c| c.get("skill_id"))
        .and_then(Value::as_str)
    {
        Some(id) => format!(
            "Skill '{id}' is not in the dataset. Check the id, or add the skill to the catalogue and rebuild"
        ),
        None => ErrorCode::SkillNotFound.suggestion().to_string(),
    }
}

fn suggest_config_missing_required(context: Option<&Value>) -> String {
    match context
        .and_then(|c| c.get("config_key"))
        .and_then(Value::as_str)
    {
        Some(key) => format!(
            "Required config '{key}' is missing. Pass it as a flag or set it in skillcat.toml"
        ),
        None => ErrorCode::ConfigMissingRequired.suggestion().to_string(),
    }
}

/// Rank known column names by closeness to a misspelled one.
pub fn suggest_similar_columns(query: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let query_lower = query.to_lowercase();
    let mut scored: Vec<_> = available
        .iter()
        .map(|name| (name, edit_distance(&query_lower, &name.to_lowercase())))
        .filter(|(name, distance)| *distance <= typo_budget(name.chars().count()))
        .collect();

    scored.sort_by_key(|(_, distance)| *distance);
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| (*name).to_string())
        .collect()
}

fn typo_budget(len: usize) -> usize {
    (len / 3).max(2)
}

/// Levenshtein distance over chars.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            current[j + 1] = (previous[j] + cost)
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
