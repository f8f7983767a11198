//! Description-versus-field consistency checks.
//!
//! Everything here is advisory. Findings are accumulated into reports and
//! never stop a run or change a value.

pub mod auditor;
pub mod completeness;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::schema::Column;

pub use auditor::ConsistencyAuditor;
pub use completeness::{LintFinding, LintReport, Severity, lint_registry};

/// Which tiers are compared against the structured fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TierPolicy {
    /// Structured fields hold the tier-1 value; higher tiers become notes.
    #[default]
    Baseline,
    /// Every tier must match the structured fields.
    Uniform,
}

impl fmt::Display for TierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TierPolicy::Baseline => "baseline",
            TierPolicy::Uniform => "uniform",
        })
    }
}

impl FromStr for TierPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(TierPolicy::Baseline),
            "uniform" => Ok(TierPolicy::Uniform),
            other => Err(format!("unknown tier policy '{other}' (expected baseline or uniform)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditPolicy {
    pub tier_policy: TierPolicy,
    /// Report fields whose kind of value the tier text never mentions.
    pub flag_unmentioned: bool,
}

/// A structured field that disagrees with its description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub skill_id: String,
    pub tier: u8,
    pub field: Column,
    /// Field value as written in the dataset.
    pub structured: String,
    /// Value looked for in the text (percent for ratio fields).
    pub expected: f64,
    pub extracted: Vec<u32>,
    pub note: String,
}

/// Higher-tier narrative that differs from the tier-1 field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierNote {
    pub skill_id: String,
    pub tier: u8,
    pub field: Column,
    pub structured: String,
    pub extracted: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapReason {
    EmptyDescription,
    NoTierMarkup,
    MissingTier,
}

impl fmt::Display for GapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GapReason::EmptyDescription => "empty description",
            GapReason::NoTierMarkup => "no tier markup",
            GapReason::MissingTier => "tier missing",
        })
    }
}

/// A description, or one tier of it, that could not be audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseGap {
    pub skill_id: String,
    pub tier: Option<u8>,
    pub reason: GapReason,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub policy: AuditPolicy,
    pub skills_audited: usize,
    pub discrepancies: Vec<Discrepancy>,
    pub tier_notes: Vec<TierNote>,
    pub parse_gaps: Vec<ParseGap>,
}

impl AuditReport {
    pub fn new(policy: AuditPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// No discrepancies. Gaps and notes are informational.
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }

    /// Discrepancies grouped by skill, in audit order.
    pub fn by_skill(&self) -> Vec<(&str, Vec<&Discrepancy>)> {
        self.discrepancies
            .iter()
            .chunk_by(|d| d.skill_id.as_str())
            .into_iter()
            .map(|(id, group)| (id, group.collect()))
            .collect()
    }
}
