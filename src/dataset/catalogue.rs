//! TOML authoring catalogue: one array of tables per role.
//!
//! ```toml
//! [[tanker]]
//! id = "bear_roar"
//! descriptionVi = "1★ giảm 15%ATK 3 lượt; 2★ ..."
//! turns = "3"
//! buffStats = { atk = 0.2 }
//! ```

use std::path::Path;

use toml::Value;
use tracing::info;

use super::read_text;
use crate::error::{CatalogError, Result};
use crate::registry::{RegistryBuilder, Role, SkillRegistry};
use crate::schema::{SkillRecord, make_record};

/// Role collections read from a catalogue, in canonical role order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    pub collections: Vec<(Role, Vec<SkillRecord>)>,
}

impl Catalogue {
    pub fn len(&self) -> usize {
        self.collections.iter().map(|(_, records)| records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> impl Iterator<Item = &SkillRecord> {
        self.collections.iter().flat_map(|(_, records)| records)
    }

    pub fn into_builder(self) -> RegistryBuilder {
        self.collections
            .into_iter()
            .fold(SkillRegistry::builder(), |builder, (role, records)| {
                builder.collection(role, records)
            })
    }

    pub fn build(self) -> Result<SkillRegistry> {
        self.into_builder().build()
    }
}

pub fn from_toml(text: &str) -> Result<Catalogue> {
    let mut table: toml::Table =
        toml::from_str(text).map_err(|err| CatalogError::Source(err.message().to_string()))?;

    if let Some(unknown) = table
        .keys()
        .find(|key| Role::ALL.iter().all(|role| role.as_str() != key.as_str())) {
        return Err(CatalogError::Source(format!(
            "unknown role collection '{unknown}'"
        )));
    }

    let mut collections = Vec::new();
    let mut violations = Vec::new();
    for role in Role::ALL {
        let Some(value) = table.remove(role.as_str()) else {
            continue;
        };
        let Value::Array(entries) = value else {
            return Err(CatalogError::Source(format!(
                "'{0}' must be an array of tables, e.g. [[{0}]]",
                role.as_str()
            )));
        };

        let mut records = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            let Value::Table(fields) = entry else {
                return Err(CatalogError::Source(format!(
                    "entry {} of '{}' is not a table",
                    position + 1,
                    role.as_str()
                )));
            };
            let overrides = fields
                .into_iter()
                .map(|(key, value)| scalar_text(&key, value).map(|text| (key, text)))
                .collect::<Result<Vec<_>>>()?;
            match make_record(overrides) {
                Ok(record) => records.push(record),
                Err(err) => violations.push(err),
            }
        }
        collections.push((role, records));
    }
    CatalogError::from_violations(violations)?;

    Ok(Catalogue { collections })
}

pub fn read_catalogue(path: &Path) -> Result<Catalogue> {
    let catalogue = from_toml(&read_text(path)?)?;
    info!(path = %path.display(), skills = catalogue.len(), "loaded authoring catalogue");
    Ok(catalogue)
}

/// Column text for a TOML value. Inline tables and arrays become JSON.
fn scalar_text(key: &str, value: Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Float(n) => Ok(n.to_string()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Array(_) | Value::Table(_) => serde_json::to_string(&value).map_err(CatalogError::from),
        Value::Datetime(_) => Err(CatalogError::Source(format!(
            "field '{key}' holds a datetime, which no column accepts"
        ))),
    }
}
