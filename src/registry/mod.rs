//! Authoritative in-memory skill registry.
//!
//! Skills are registered once, in order, and exported once. Identity is the
//! skill id: a second registration of the same id is rejected and the first
//! record is kept.

pub mod types;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::schema::SkillRecord;

pub use types::{ActionPattern, DamageType, Role, ScaleStat, SkillDefinition};

/// Registry lifecycle. There is no transition back once exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistryState {
    Empty,
    Populated,
    Exported,
}

#[derive(Debug, Clone)]
pub struct SkillRegistry {
    skills: Vec<SkillDefinition>,
    index: HashMap<String, usize>,
    roles: HashMap<String, Role>,
    state: RegistryState,
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self {
            skills: Vec::new(),
            index: HashMap::new(),
            roles: HashMap::new(),
            state: RegistryState::Empty,
        }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Build a registry from previously exported records.
    pub fn import<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = SkillRecord>,
    {
        let records: Vec<SkillRecord> = records.into_iter().collect();
        verify_no_duplicates(&records)?;

        let mut registry = Self::new();
        for ((), definition) in validate_all(records.into_iter().map(|record| ((), record)))? {
            registry.register(definition)?;
        }
        debug!(count = registry.len(), "imported skill records");
        Ok(registry)
    }

    /// Insert a skill, keeping insertion order.
    pub fn register(&mut self, definition: SkillDefinition) -> Result<()> {
        if self.state == RegistryState::Exported {
            return Err(CatalogError::RegistrySealed(definition.id().to_string()));
        }
        if self.index.contains_key(definition.id()) {
            return Err(CatalogError::DuplicateId(definition.id().to_string()));
        }

        self.index
            .insert(definition.id().to_string(), self.skills.len());
        self.skills.push(definition);
        self.state = RegistryState::Populated;
        Ok(())
    }

    /// Validate and insert a raw record.
    pub fn register_record(&mut self, record: SkillRecord) -> Result<()> {
        self.register(SkillDefinition::from_record(record)?)
    }

    /// Records in insertion order, each in schema column order.
    ///
    /// Seals the registry: later registrations are rejected so repeated
    /// exports stay identical.
    pub fn export_all(&mut self) -> Vec<SkillRecord> {
        self.state = RegistryState::Exported;
        info!(count = self.skills.len(), "exporting skill registry");
        self.skills.iter().map(|s| s.record().clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&SkillDefinition> {
        self.index.get(id).map(|&position| &self.skills[position])
    }

    /// Look up a skill that has to be present.
    pub fn require(&self, id: &str) -> Result<&SkillDefinition> {
        self.get(id)
            .ok_or_else(|| CatalogError::SkillNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(SkillDefinition::id)
    }

    pub fn state(&self) -> RegistryState {
        self.state
    }

    /// Role collection a skill was declared in, when built from collections.
    pub fn role_of(&self, id: &str) -> Option<Role> {
        self.roles.get(id).copied()
    }

    fn register_in_role(&mut self, role: Role, definition: SkillDefinition) -> Result<()> {
        let id = definition.id().to_string();
        self.register(definition)?;
        self.roles.insert(id, role);
        Ok(())
    }
}

/// Validate every record before any is registered, reporting all invalid
/// records in one error.
fn validate_all<T, I>(records: I) -> Result<Vec<(T, SkillDefinition)>>
where
    I: IntoIterator<Item = (T, SkillRecord)>,
{
    let mut definitions = Vec::new();
    let mut violations = Vec::new();
    for (tag, record) in records {
        match SkillDefinition::from_record(record) {
            Ok(definition) => definitions.push((tag, definition)),
            Err(err) => violations.push(err),
        }
    }
    CatalogError::from_violations(violations)?;
    Ok(definitions)
}

impl<'a> IntoIterator for &'a SkillRegistry {
    type Item = &'a SkillDefinition;
    type IntoIter = std::slice::Iter<'a, SkillDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.skills.iter()
    }
}

/// Pre-flight identity check over candidate records.
///
/// Reports every duplicated id, sorted, in one error instead of stopping at
/// the first.
pub fn verify_no_duplicates<'a, I>(records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a SkillRecord>,
{
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            duplicates.insert(record.id().to_string());
        }
    }

    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(CatalogError::DuplicateIds {
            ids: duplicates.into_iter().collect(),
        })
    }
}

/// Assembles a registry from one named collection per role.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    collections: Vec<(Role, Vec<SkillRecord>)>,
}

impl RegistryBuilder {
    /// Add records to a role's collection. Collections register in the order
    /// they were first added.
    #[must_use]
    pub fn collection<I>(mut self, role: Role, records: I) -> Self
    where
        I: IntoIterator<Item = SkillRecord>,
    {
        match self.collections.iter_mut().find(|(r, _)| *r == role) {
            Some((_, existing)) => existing.extend(records),
            None => self.collections.push((role, records.into_iter().collect())),
        }
        self
    }

    pub fn build(self) -> Result<SkillRegistry> {
        verify_no_duplicates(self.collections.iter().flat_map(|(_, records)| records))?;

        for (role, records) in &self.collections {
            debug!(role = %role, count = records.len(), "validating role collection");
        }
        let definitions = validate_all(
            self.collections
                .into_iter()
                .flat_map(|(role, records)| records.into_iter().map(move |record| (role, record))),
        )?;

        let mut registry = SkillRegistry::new();
        for (role, definition) in definitions {
            registry.register_in_role(role, definition)?;
        }
        info!(count = registry.len(), "skill registry built");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::make_record;

    fn skill(id: &str, name: &str) -> SkillRecord {
        make_record([("id", id), ("name", name)]).unwrap()
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut registry = SkillRegistry::new();
        registry.register_record(skill("bear_roar", "First")).unwrap();
        let err = registry
            .register_record(skill("bear_roar", "Second"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "bear_roar"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("bear_roar").unwrap().name(), "First");
    }

    #[test]
    fn require_names_the_missing_skill() {
        let registry = SkillRegistry::import([skill("bear_roar", "Bear")]).unwrap();
        assert_eq!(registry.require("bear_roar").unwrap().name(), "Bear");

        let err = registry.require("bear_rawr").unwrap_err();
        assert!(matches!(err, CatalogError::SkillNotFound(ref id) if id == "bear_rawr"));
        assert_eq!(err.code(), crate::error::ErrorCode::SkillNotFound);
    }

    #[test]
    fn lifecycle_is_linear() {
        let mut registry = SkillRegistry::new();
        assert_eq!(registry.state(), RegistryState::Empty);
        registry.register_record(skill("a", "A")).unwrap();
        assert_eq!(registry.state(), RegistryState::Populated);
        registry.export_all();
        assert_eq!(registry.state(), RegistryState::Exported);

        let err = registry.register_record(skill("b", "B")).unwrap_err();
        assert!(matches!(err, CatalogError::RegistrySealed(_)));
        assert_eq!(registry.state(), RegistryState::Exported);
    }

    #[test]
    fn export_preserves_insertion_order() {
        let mut registry = SkillRegistry::new();
        for id in ["zebra", "alpha", "mid"] {
            registry.register_record(skill(id, id)).unwrap();
        }
        let ids: Vec<String> = registry
            .export_all()
            .iter()
            .map(|r| r.id().to_string())
            .collect();
        assert_eq!(ids, ["zebra", "alpha", "mid"]);
    }

    #[test]
    fn export_twice_is_identical() {
        let mut registry = SkillRegistry::new();
        registry.register_record(skill("a", "A")).unwrap();
        assert_eq!(registry.export_all(), registry.export_all());
    }

    #[test]
    fn verify_lists_every_duplicate_sorted() {
        let records = vec![
            skill("b", "1"),
            skill("a", "1"),
            skill("b", "2"),
            skill("c", "1"),
            skill("a", "2"),
            skill("b", "3"),
        ];
        match verify_no_duplicates(&records).unwrap_err() {
            CatalogError::DuplicateIds { ids } => assert_eq!(ids, ["a", "b"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(verify_no_duplicates(&records[..2]).is_ok());
    }

    #[test]
    fn builder_checks_across_collections() {
        let err = SkillRegistry::builder()
            .collection(Role::Tanker, vec![skill("shared", "T")])
            .collection(Role::Mage, vec![skill("shared", "M")])
            .build()
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateIds { ref ids } if ids == &["shared"]));
    }

    #[test]
    fn builder_remembers_roles_and_order() {
        let registry = SkillRegistry::builder()
            .collection(Role::Mage, vec![skill("fireball", "F")])
            .collection(Role::Tanker, vec![skill("bear_roar", "B")])
            .collection(Role::Mage, vec![skill("frost", "I")])
            .build()
            .unwrap();
        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(ids, ["fireball", "frost", "bear_roar"]);
        assert_eq!(registry.role_of("frost"), Some(Role::Mage));
        assert_eq!(registry.role_of("bear_roar"), Some(Role::Tanker));
        assert_eq!(registry.role_of("missing"), None);
    }

    fn invalid_ids(err: CatalogError) -> Vec<String> {
        match err {
            CatalogError::SchemaViolations(errors) => errors
                .iter()
                .filter_map(CatalogError::skill_id)
                .map(str::to_string)
                .collect(),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn builder_reports_every_invalid_record() {
        let err = SkillRegistry::builder()
            .collection(Role::Tanker, vec![make_record([("id", "a"), ("turns", "three")]).unwrap()])
            .collection(Role::Support, vec![skill("ok", "Fine")])
            .collection(Role::Mage, vec![make_record([("id", "b"), ("stunChance", "high")]).unwrap()])
            .build()
            .unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::InvalidFieldValue);
        assert_eq!(invalid_ids(err), ["a", "b"]);
    }

    #[test]
    fn import_reports_every_invalid_record() {
        let records = vec![
            make_record([("id", "a"), ("turns", "three")]).unwrap(),
            make_record([("id", "b"), ("actionPattern", "FLYING")]).unwrap(),
        ];
        let err = SkillRegistry::import(records).unwrap_err();
        assert_eq!(invalid_ids(err), ["a", "b"]);
    }

    #[test]
    fn import_round_trips_export() {
        let mut registry = SkillRegistry::builder()
            .collection(
                Role::Archer,
                vec![
                    make_record([("id", "volley"), ("turns", "2"), ("stunChance", "0.15")]).unwrap(),
                    skill("snipe", "Snipe"),
                ],
            )
            .build()
            .unwrap();
        let exported = registry.export_all();
        let mut reimported = SkillRegistry::import(exported.clone()).unwrap();
        assert_eq!(reimported.len(), registry.len());
        assert_eq!(reimported.export_all(), exported);
    }
}
