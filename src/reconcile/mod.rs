//! Divergence between two sources that declare the same skills.
//!
//! Neither side is treated as canonical. Each differing column is classified
//! so a reviewer can tell spelling drift from a real change in numbers.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::description::fold;
use crate::schema::{Column, ColumnKind, SkillRecord};

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("number regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceKind {
    /// Same after folding diacritics and collapsing whitespace, or the same number.
    Wording,
    /// The numbers mentioned differ.
    Numeric,
    /// Any other difference.
    Value,
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DivergenceKind::Wording => "wording",
            DivergenceKind::Numeric => "numeric",
            DivergenceKind::Value => "value",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDivergence {
    pub column: Column,
    pub left: String,
    pub right: String,
    pub kind: DivergenceKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDivergence {
    pub skill_id: String,
    pub columns: Vec<ColumnDivergence>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Ids present in both sources.
    pub compared: usize,
    pub divergent: Vec<SkillDivergence>,
    pub only_left: Vec<String>,
    pub only_right: Vec<String>,
    /// Later declarations of an id the left source already declared,
    /// compared against its first declaration.
    pub repeated_left: Vec<SkillDivergence>,
    pub repeated_right: Vec<SkillDivergence>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.finding_count() == 0
    }

    pub fn finding_count(&self) -> usize {
        self.divergent.len()
            + self.only_left.len()
            + self.only_right.len()
            + self.repeated_left.len()
            + self.repeated_right.len()
    }
}

/// Compare two record sets by skill id, in left order.
///
/// Ids repeated within one source are reported on their own; the comparison
/// across sources uses each side's first declaration.
pub fn reconcile(left: &[SkillRecord], right: &[SkillRecord]) -> ReconcileReport {
    let mut right_by_id: HashMap<&str, &SkillRecord> = HashMap::new();
    for record in right {
        right_by_id.entry(record.id()).or_insert(record);
    }

    let mut report = ReconcileReport::default();
    let mut seen = HashSet::new();
    for record in left {
        if !seen.insert(record.id()) {
            continue;
        }
        let Some(other) = right_by_id.get(record.id()) else {
            report.only_left.push(record.id().to_string());
            continue;
        };
        report.compared += 1;

        let columns = diff_columns(record, other);
        if !columns.is_empty() {
            report.divergent.push(SkillDivergence {
                skill_id: record.id().to_string(),
                columns,
            });
        }
    }

    let mut listed = HashSet::new();
    for record in right {
        if !seen.contains(record.id()) && listed.insert(record.id()) {
            report.only_right.push(record.id().to_string());
        }
    }

    report.repeated_left = repeated(left);
    report.repeated_right = repeated(right);

    info!(
        compared = report.compared,
        divergent = report.divergent.len(),
        only_left = report.only_left.len(),
        only_right = report.only_right.len(),
        repeated = report.repeated_left.len() + report.repeated_right.len(),
        "reconciled sources"
    );
    report
}

fn diff_columns(left: &SkillRecord, right: &SkillRecord) -> Vec<ColumnDivergence> {
    Column::ALL
        .iter()
        .filter(|c| left.raw(**c) != right.raw(**c))
        .map(|&column| {
            let (a, b) = (left.raw(column), right.raw(column));
            ColumnDivergence {
                column,
                left: a.to_string(),
                right: b.to_string(),
                kind: classify(column, a, b),
            }
        })
        .collect()
}

/// Every later declaration of an id within one source, diffed against the
/// first. Identical copies are listed with no columns.
fn repeated(records: &[SkillRecord]) -> Vec<SkillDivergence> {
    let mut first: HashMap<&str, &SkillRecord> = HashMap::new();
    let mut repeats = Vec::new();
    for record in records {
        match first.get(record.id()) {
            Some(original) => repeats.push(SkillDivergence {
                skill_id: record.id().to_string(),
                columns: diff_columns(original, record),
            }),
            None => {
                first.insert(record.id(), record);
            }
        }
    }
    repeats
}

/// Classify a difference between two values of one column.
pub fn classify(column: Column, left: &str, right: &str) -> DivergenceKind {
    if column.kind() == ColumnKind::Number {
        return match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
            (Ok(a), Ok(b)) if a == b => DivergenceKind::Wording,
            (Ok(_), Ok(_)) => DivergenceKind::Numeric,
            _ => DivergenceKind::Value,
        };
    }

    if normalize(left) == normalize(right) {
        DivergenceKind::Wording
    } else if numbers(left) != numbers(right) {
        DivergenceKind::Numeric
    } else {
        DivergenceKind::Value
    }
}

fn normalize(text: &str) -> String {
    fold(text).split_whitespace().collect::<Vec<_>>().join(" ")
}

fn numbers(text: &str) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}
