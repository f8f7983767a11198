use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::schema::{Column, ColumnKind, SkillRecord};

/// Unit role. Declaration order is the canonical report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tanker,
    Fighter,
    Mage,
    Archer,
    Assassin,
    Support,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Tanker,
        Role::Fighter,
        Role::Mage,
        Role::Archer,
        Role::Assassin,
        Role::Support,
    ];

    /// Lowercase key used in authoring catalogues.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Tanker => "tanker",
            Role::Fighter => "fighter",
            Role::Mage => "mage",
            Role::Archer => "archer",
            Role::Assassin => "assassin",
            Role::Support => "support",
        }
    }

    /// Uppercase label used in rosters and reports.
    pub const fn label(self) -> &'static str {
        match self {
            Role::Tanker => "TANKER",
            Role::Fighter => "FIGHTER",
            Role::Mage => "MAGE",
            Role::Archer => "ARCHER",
            Role::Assassin => "ASSASSIN",
            Role::Support => "SUPPORT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown role '{needle}'"))
    }
}

/// Targeting pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionPattern {
    #[serde(rename = "SELF")]
    SelfCast,
    MeleeFront,
    RangedStatic,
    AssassinBack,
}

impl ActionPattern {
    pub const fn as_str(self) -> &'static str {
        match self {
            ActionPattern::SelfCast => "SELF",
            ActionPattern::MeleeFront => "MELEE_FRONT",
            ActionPattern::RangedStatic => "RANGED_STATIC",
            ActionPattern::AssassinBack => "ASSASSIN_BACK",
        }
    }
}

impl FromStr for ActionPattern {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "SELF" => Ok(ActionPattern::SelfCast),
            "MELEE_FRONT" => Ok(ActionPattern::MeleeFront),
            "RANGED_STATIC" => Ok(ActionPattern::RangedStatic),
            "ASSASSIN_BACK" => Ok(ActionPattern::AssassinBack),
            _ => Err("expected SELF, MELEE_FRONT, RANGED_STATIC or ASSASSIN_BACK".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    Physical,
    Magic,
    True,
}

impl DamageType {
    pub const fn as_str(self) -> &'static str {
        match self {
            DamageType::Physical => "physical",
            DamageType::Magic => "magic",
            DamageType::True => "true",
        }
    }
}

impl FromStr for DamageType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "physical" => Ok(DamageType::Physical),
            "magic" => Ok(DamageType::Magic),
            "true" => Ok(DamageType::True),
            _ => Err("expected physical, magic, true or none".to_string()),
        }
    }
}

/// Stat a value scales from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleStat {
    Atk,
    Def,
    Matk,
}

impl FromStr for ScaleStat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "atk" => Ok(ScaleStat::Atk),
            "def" => Ok(ScaleStat::Def),
            "matk" => Ok(ScaleStat::Matk),
            _ => Err("expected atk, def or matk".to_string()),
        }
    }
}

/// A validated skill.
///
/// Typed views are derived from the raw record, which stays authoritative
/// for export.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillDefinition {
    record: SkillRecord,
    action_pattern: Option<ActionPattern>,
    damage_type: Option<DamageType>,
    scale_stat: Option<ScaleStat>,
    numbers: BTreeMap<Column, f64>,
    documents: BTreeMap<Column, Value>,
}

impl SkillDefinition {
    /// Validate a record. Unset columns stay absent, never zero.
    pub fn from_record(record: SkillRecord) -> Result<Self> {
        let id = record.id().trim();
        if id.is_empty() {
            return Err(CatalogError::InvalidValue {
                skill_id: "<no id>".to_string(),
                column: Column::Id.name().to_string(),
                value: String::new(),
                reason: "skill id must not be empty".to_string(),
            });
        }
        if id != record.id() {
            return Err(invalid(&record, Column::Id, "skill id must not have surrounding whitespace"));
        }

        let mut numbers = BTreeMap::new();
        let mut documents = BTreeMap::new();
        let mut action_pattern = None;
        let mut damage_type = None;
        let mut scale_stat = None;
        let mut violations = Vec::new();

        for (column, value) in record.populated() {
            let checked = match column.kind() {
                ColumnKind::Text => Ok(()),
                ColumnKind::Number => value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|number| {
                        numbers.insert(column, number);
                    })
                    .ok_or_else(|| invalid(&record, column, "expected a number")),
                ColumnKind::Json => serde_json::from_str::<Value>(value)
                    .map(|document| {
                        documents.insert(column, document);
                    })
                    .map_err(|err| invalid(&record, column, &format!("invalid JSON: {err}"))),
                ColumnKind::Enum => match column {
                    Column::ActionPattern => {
                        parse_enum::<ActionPattern>(&record, column, value)
                            .map(|v| action_pattern = Some(v))
                    }
                    Column::DamageType if value == "none" => Ok(()),
                    Column::DamageType => {
                        parse_enum::<DamageType>(&record, column, value)
                            .map(|v| damage_type = Some(v))
                    }
                    Column::ScaleStat => {
                        parse_enum::<ScaleStat>(&record, column, value).map(|v| scale_stat = Some(v))
                    }
                    Column::ShieldScaleStat => parse_enum::<ScaleStat>(&record, column, value).map(drop),
                    _ => Ok(()),
                },
            };
            if let Err(err) = checked {
                violations.push(err);
            }
        }
        CatalogError::from_violations(violations)?;

        Ok(Self {
            record,
            action_pattern,
            damage_type,
            scale_stat,
            numbers,
            documents,
        })
    }

    pub fn id(&self) -> &str {
        self.record.id()
    }

    pub fn name(&self) -> &str {
        self.record.raw(Column::Name)
    }

    pub fn description(&self) -> &str {
        self.record.raw(Column::DescriptionVi)
    }

    pub fn effect(&self) -> Option<&str> {
        self.record.get(Column::Effect)
    }

    pub fn action_pattern(&self) -> Option<ActionPattern> {
        self.action_pattern
    }

    pub fn damage_type(&self) -> Option<DamageType> {
        self.damage_type
    }

    pub fn scale_stat(&self) -> Option<ScaleStat> {
        self.scale_stat
    }

    /// Parsed value of a numeric column.
    pub fn number(&self, column: Column) -> Option<f64> {
        self.numbers.get(&column).copied()
    }

    /// Parsed value of a JSON column.
    pub fn document(&self, column: Column) -> Option<&Value> {
        self.documents.get(&column)
    }

    /// Raw text of any column, `None` when unset.
    pub fn raw(&self, column: Column) -> Option<&str> {
        self.record.get(column)
    }

    pub fn record(&self) -> &SkillRecord {
        &self.record
    }
}

fn parse_enum<T: FromStr<Err = String>>(record: &SkillRecord, column: Column, value: &str) -> Result<T> {
    value.parse::<T>().map_err(|reason| invalid(record, column, &reason))
}

fn invalid(record: &SkillRecord, column: Column, reason: &str) -> CatalogError {
    CatalogError::InvalidValue {
        skill_id: record.id().to_string(),
        column: column.name().to_string(),
        value: record.raw(column).to_string(),
        reason: reason.to_string(),
    }
}
