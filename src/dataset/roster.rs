//! Unit roster import.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use super::{csv, read_text};
use crate::error::{CatalogError, Result};
use crate::linker::UnitReference;
use crate::registry::Role;

pub const ROLE_COLUMN: &str = "classType";
pub const TIER_COLUMN: &str = "tier";
pub const ID_COLUMN: &str = "id";
pub const NAME_COLUMN: &str = "name";
pub const SKILL_COLUMN: &str = "skillId";

pub const MAX_UNIT_TIER: u8 = 5;

/// A roster row that was dropped, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: usize,
    pub reason: String,
}

impl std::fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "roster line {}: {}", self.line, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub units: Vec<UnitReference>,
    /// Rows dropped for an unknown role, a bad tier or a missing id.
    pub skipped: Vec<SkippedRow>,
}

impl Roster {
    fn skip(&mut self, line: usize, reason: String) {
        warn!(line, %reason, "skipping roster row");
        self.skipped.push(SkippedRow { line, reason });
    }
}

/// Parse roster text. Only the roster columns are read; others are ignored.
pub fn from_csv(text: &str) -> Result<Roster> {
    let table = csv::parse(text)?;
    let position = |name: &str| table.header.iter().position(|h| h == name);

    let missing: Vec<&str> = [ROLE_COLUMN, TIER_COLUMN, ID_COLUMN, SKILL_COLUMN]
        .into_iter()
        .filter(|name| position(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::HeaderMismatch(format!(
            "roster is missing column(s): {}",
            missing.join(", ")
        )));
    }
    let (Some(role_at), Some(tier_at), Some(id_at), Some(skill_at)) = (
        position(ROLE_COLUMN),
        position(TIER_COLUMN),
        position(ID_COLUMN),
        position(SKILL_COLUMN),
    ) else {
        return Err(CatalogError::HeaderMismatch("roster header".to_string()));
    };
    let name_at = position(NAME_COLUMN);

    let mut roster = Roster::default();
    for row in &table.rows {
        let field = |at: usize| row.fields.get(at).map_or("", |v| v.trim());

        let role = match field(role_at).parse::<Role>() {
            Ok(role) => role,
            Err(reason) => {
                roster.skip(row.line, reason);
                continue;
            }
        };
        let tier = match field(tier_at).parse::<u8>() {
            Ok(tier) if (1..=MAX_UNIT_TIER).contains(&tier) => tier,
            _ => {
                roster.skip(row.line, format!("invalid tier '{}'", field(tier_at)));
                continue;
            }
        };
        let (unit_id, skill_id) = (field(id_at), field(skill_at));
        if unit_id.is_empty() || skill_id.is_empty() {
            roster.skip(row.line, "missing unit id or skill id".to_string());
            continue;
        }

        roster.units.push(UnitReference {
            role,
            tier,
            unit_id: unit_id.to_string(),
            name: name_at.map(field).unwrap_or_default().to_string(),
            skill_id: skill_id.to_string(),
        });
    }

    Ok(roster)
}

pub fn read_roster(path: &Path) -> Result<Roster> {
    let roster = from_csv(&read_text(path)?)?;
    info!(
        path = %path.display(),
        units = roster.units.len(),
        skipped = roster.skipped.len(),
        "loaded unit roster"
    );
    Ok(roster)
}
