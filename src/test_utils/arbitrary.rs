use proptest::prelude::*;

use crate::schema::{COLUMN_COUNT, Column, SkillRecord};

/// Field text that exercises quoting: commas, quotes, line breaks, diacritics.
pub fn arb_field_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,\"\n%;★đơưấờ]{0,24}"
}

pub fn arb_skill_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// A record with an id and arbitrary text in every other column.
pub fn arb_record() -> impl Strategy<Value = SkillRecord> {
    (
        arb_skill_id(),
        prop::collection::vec(arb_field_text(), COLUMN_COUNT - 1),
    )
        .prop_map(|(id, values)| {
            let mut record = SkillRecord::default();
            record.set(Column::Id, id);
            for (column, value) in Column::ALL[1..].iter().zip(values) {
                record.set(*column, value);
            }
            record
        })
}

/// Records with distinct ids.
pub fn arb_records() -> impl Strategy<Value = Vec<SkillRecord>> {
    prop::collection::vec(arb_record(), 0..8).prop_map(|records| {
        let mut seen = std::collections::HashSet::new();
        records
            .into_iter()
            .filter(|r| seen.insert(r.id().to_string()))
            .collect()
    })
}

/// One tier segment body with no star marker inside it.
pub fn arb_tier_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9%]{1,8}( [a-zA-Z0-9%]{1,8}){0,5}"
}
