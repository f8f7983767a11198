//! Joins a unit roster against the skill registry.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::registry::{Role, SkillDefinition, SkillRegistry};
use crate::schema::Column;

/// Placeholder for a summary field the skill leaves unset.
pub const MISSING: &str = "?";

/// A unit as listed in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitReference {
    pub role: Role,
    pub tier: u8,
    pub unit_id: String,
    pub name: String,
    pub skill_id: String,
}

/// Compact view of a resolved skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillSummary {
    pub base: String,
    pub scale: String,
    pub damage_type: String,
}

impl SkillSummary {
    fn of(skill: &SkillDefinition) -> Self {
        let field = |column| skill.raw(column).unwrap_or(MISSING).to_string();
        Self {
            base: field(Column::Base),
            scale: field(Column::Scale),
            damage_type: field(Column::DamageType),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    Resolved(SkillSummary),
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    pub tier: u8,
    pub unit_id: String,
    pub name: String,
    pub skill_id: String,
    pub resolution: Resolution,
    /// Effect tag of the resolved skill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

impl LinkEntry {
    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleSection {
    pub role: Role,
    pub entries: Vec<LinkEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkReport {
    pub sections: Vec<RoleSection>,
}

impl LinkReport {
    pub fn entries(&self) -> impl Iterator<Item = (Role, &LinkEntry)> {
        self.sections
            .iter()
            .flat_map(|section| section.entries.iter().map(move |e| (section.role, e)))
    }

    pub fn unresolved(&self) -> impl Iterator<Item = (Role, &LinkEntry)> {
        self.entries().filter(|(_, entry)| !entry.is_resolved())
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.entries().filter(|(_, e)| e.is_resolved()).count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.len() - self.resolved_count()
    }

    /// Effect tags shared by more than one distinct referenced skill.
    pub fn shared_effects(&self) -> BTreeMap<String, Vec<String>> {
        let mut by_effect: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (_, entry) in self.entries() {
            if let Some(effect) = &entry.effect {
                by_effect
                    .entry(effect.clone())
                    .or_default()
                    .insert(entry.skill_id.clone());
            }
        }
        by_effect
            .into_iter()
            .filter(|(_, skills)| skills.len() > 1)
            .map(|(effect, skills)| (effect, skills.into_iter().collect()))
            .collect()
    }
}

/// Resolve every unit's skill reference.
///
/// Roles appear in canonical order and only when they have units; units are
/// sorted by tier within a role, keeping roster order for equal tiers.
pub fn link(units: &[UnitReference], registry: &SkillRegistry) -> LinkReport {
    let mut sections = Vec::new();

    for role in Role::ALL {
        let mut members: Vec<&UnitReference> = units.iter().filter(|u| u.role == role).collect();
        if members.is_empty() {
            continue;
        }
        members.sort_by_key(|u| u.tier);

        let entries = members
            .into_iter()
            .map(|unit| {
                let skill = registry.get(&unit.skill_id);
                if skill.is_none() {
                    warn!(unit = %unit.unit_id, skill = %unit.skill_id, "unresolved skill reference");
                }
                LinkEntry {
                    tier: unit.tier,
                    unit_id: unit.unit_id.clone(),
                    name: unit.name.clone(),
                    skill_id: unit.skill_id.clone(),
                    resolution: skill.map_or(Resolution::Unresolved, |s| {
                        Resolution::Resolved(SkillSummary::of(s))
                    }),
                    effect: skill.and_then(|s| s.effect()).map(str::to_string),
                }
            })
            .collect();
        sections.push(RoleSection { role, entries });
    }

    let report = LinkReport { sections };
    debug!(
        units = report.len(),
        unresolved = report.unresolved_count(),
        "linked roster"
    );
    report
}
