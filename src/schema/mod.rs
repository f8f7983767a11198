//! Skill column catalogue and full-width records.

pub mod column;
pub mod record;

pub use column::{COLUMN_COUNT, Column, ColumnKind};
pub use record::{ColumnLayout, SkillRecord, make_record};
