//! The skill dataset file.

use std::path::Path;

use tracing::{debug, info};

use super::{csv, read_text, write_text};
use crate::error::{CatalogError, Result};
use crate::schema::{Column, ColumnLayout, SkillRecord};

/// Render records under the schema header, in the given order.
pub fn to_csv(records: &[SkillRecord]) -> String {
    let mut out = String::new();
    csv::write_record(&mut out, Column::header());
    for record in records {
        csv::write_record(&mut out, record.values());
    }
    out
}

/// Read records from dataset text. Columns are matched by header name.
pub fn from_csv(text: &str) -> Result<Vec<SkillRecord>> {
    let table = csv::parse(text)?;
    let layout = ColumnLayout::from_header(&table.header)?;
    if !layout.is_canonical() {
        debug!("dataset header differs from schema order; reading by name");
    }

    table
        .rows
        .iter()
        .map(|row| {
            layout.read(&row.fields).map_err(|err| match err {
                CatalogError::Dataset(message) => {
                    CatalogError::Dataset(format!("line {}: {message}", row.line))
                }
                other => other,
            })
        })
        .collect()
}

pub fn read_skills(path: &Path) -> Result<Vec<SkillRecord>> {
    let records = from_csv(&read_text(path)?)?;
    info!(path = %path.display(), count = records.len(), "loaded skill dataset");
    Ok(records)
}

/// Write the dataset, then read it back and confirm nothing changed.
pub fn write_skills(path: &Path, records: &[SkillRecord]) -> Result<()> {
    write_text(path, &to_csv(records))?;
    verify_round_trip(path, records)?;
    info!(path = %path.display(), count = records.len(), "wrote skill dataset");
    Ok(())
}

/// Compare a written dataset against the records it was written from.
pub fn verify_round_trip(path: &Path, expected: &[SkillRecord]) -> Result<()> {
    let actual = read_skills(path)?;
    if actual.len() != expected.len() {
        return Err(CatalogError::RoundTripMismatch(format!(
            "wrote {} records but read back {}",
            expected.len(),
            actual.len()
        )));
    }
    if let Some((written, read)) = expected.iter().zip(&actual).find(|(a, b)| a != b) {
        let column = Column::ALL
            .iter()
            .find(|c| written.raw(**c) != read.raw(**c))
            .map_or("?", |c| c.name());
        return Err(CatalogError::RoundTripMismatch(format!(
            "skill '{}' changed in column '{column}'",
            written.id()
        )));
    }
    Ok(())
}
