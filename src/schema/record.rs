use serde::Serialize;
use serde::ser::SerializeMap;

use super::column::{COLUMN_COUNT, Column};
use crate::error::{CatalogError, Result};

/// A full-width skill row: one raw value per schema column.
///
/// Unused columns hold the empty string. Values are kept exactly as written
/// so a record survives export and re-import unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRecord {
    values: Vec<String>,
}

impl Default for SkillRecord {
    fn default() -> Self {
        Self {
            values: vec![String::new(); COLUMN_COUNT],
        }
    }
}

impl SkillRecord {
    /// Value of a column, `None` when the column is unused.
    pub fn get(&self, column: Column) -> Option<&str> {
        let value = self.values[column.index()].as_str();
        (!value.is_empty()).then_some(value)
    }

    /// Raw value of a column; empty when unused.
    pub fn raw(&self, column: Column) -> &str {
        &self.values[column.index()]
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        self.values[column.index()] = value.into();
    }

    pub fn id(&self) -> &str {
        self.raw(Column::Id)
    }

    /// Values in schema column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Columns that carry a value.
    pub fn populated(&self) -> impl Iterator<Item = (Column, &str)> {
        Column::ALL
            .iter()
            .copied()
            .filter_map(|column| self.get(column).map(|value| (column, value)))
    }

    pub fn to_row(&self) -> Vec<String> {
        self.values.clone()
    }

    /// Read a record from a row addressed by `header`.
    pub fn from_row<S: AsRef<str>>(header: &[S], row: &[String]) -> Result<Self> {
        ColumnLayout::from_header(header)?.read(row)
    }
}

impl Serialize for SkillRecord {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let populated: Vec<_> = self.populated().collect();
        let mut map = serializer.serialize_map(Some(populated.len()))?;
        for (column, value) in populated {
            map.serialize_entry(column.name(), value)?;
        }
        map.end()
    }
}

/// Build a full-width record from a sparse set of overrides.
///
/// Every key must name a schema column. All unrecognized keys are reported
/// together so a single run surfaces every typo.
pub fn make_record<K, V, I>(overrides: I) -> Result<SkillRecord>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<String>,
{
    let mut record = SkillRecord::default();
    let mut unknown = Vec::new();

    for (key, value) in overrides {
        let key = key.as_ref();
        match key.parse::<Column>() {
            Ok(column) => record.set(column, value),
            Err(_) => unknown.push(key.to_string()),
        }
    }

    if unknown.is_empty() {
        return Ok(record);
    }

    unknown.sort();
    let skill_id = if record.id().is_empty() {
        "<no id>".to_string()
    } else {
        record.id().to_string()
    };
    Err(CatalogError::UnknownColumns {
        skill_id,
        columns: unknown,
    })
}

/// Maps positions of an imported header onto schema columns.
///
/// Imported files may order their columns differently; reading goes by name.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    positions: Vec<Column>,
}

impl ColumnLayout {
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self> {
        let mut positions = Vec::with_capacity(header.len());
        let mut unknown = Vec::new();

        for name in header {
            let name = name.as_ref().trim();
            match name.parse::<Column>() {
                Ok(column) if positions.contains(&column) => {
                    return Err(CatalogError::HeaderMismatch(format!(
                        "column '{name}' appears more than once"
                    )));
                }
                Ok(column) => positions.push(column),
                Err(_) => unknown.push(name.to_string()),
            }
        }

        if !unknown.is_empty() {
            return Err(CatalogError::UnknownColumns {
                skill_id: "<header>".to_string(),
                columns: unknown,
            });
        }
        if !positions.contains(&Column::Id) {
            return Err(CatalogError::HeaderMismatch(
                "header has no 'id' column".to_string(),
            ));
        }

        Ok(Self { positions })
    }

    /// Whether the header is exactly the schema header in schema order.
    pub fn is_canonical(&self) -> bool {
        self.positions.as_slice() == Column::ALL.as_slice()
    }

    pub fn read(&self, row: &[String]) -> Result<SkillRecord> {
        if row.len() > self.positions.len() {
            return Err(CatalogError::Dataset(format!(
                "row has {} fields but the header has {}",
                row.len(),
                self.positions.len()
            )));
        }

        let mut record = SkillRecord::default();
        for (column, value) in self.positions.iter().zip(row) {
            record.set(*column, value.as_str());
        }
        Ok(record)
    }
}
