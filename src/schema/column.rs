use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of columns in the skill dataset.
pub const COLUMN_COUNT: usize = 45;

/// How a column's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Free text, kept verbatim.
    Text,
    /// One of a closed set of values.
    Enum,
    /// A decimal number.
    Number,
    /// An embedded JSON document.
    Json,
}

/// A recognized skill dataset column.
///
/// Declaration order is the export order of the dataset header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Id,
    Name,
    DescriptionVi,
    ActionPattern,
    Effect,
    DamageType,
    Base,
    ScaleStat,
    Scale,
    ShieldBase,
    TauntTurns,
    StunChance,
    StunTurns,
    ReflectPct,
    ReflectTurns,
    ArmorBuff,
    MdefBuff,
    Turns,
    Hit1,
    Hit2,
    Lifesteal,
    EchoBase,
    EchoScale,
    MaxHits,
    SleepChance,
    SleepTurns,
    ArmorBreak,
    FreezeChance,
    FreezeTurns,
    SplashCount,
    PoisonTurns,
    PoisonPerTurn,
    ShieldScaleStat,
    ShieldScale,
    RageGain,
    MaxTargets,
    SelfAtkBuff,
    AssistRate,
    EvadeBuff,
    AtkBuff,
    BuffStats,
    ArmorPen,
    KillRage,
    DiseaseTurns,
    DiseaseDamage,
}

impl Column {
    /// Every column in header order.
    pub const ALL: [Column; COLUMN_COUNT] = [
        Column::Id,
        Column::Name,
        Column::DescriptionVi,
        Column::ActionPattern,
        Column::Effect,
        Column::DamageType,
        Column::Base,
        Column::ScaleStat,
        Column::Scale,
        Column::ShieldBase,
        Column::TauntTurns,
        Column::StunChance,
        Column::StunTurns,
        Column::ReflectPct,
        Column::ReflectTurns,
        Column::ArmorBuff,
        Column::MdefBuff,
        Column::Turns,
        Column::Hit1,
        Column::Hit2,
        Column::Lifesteal,
        Column::EchoBase,
        Column::EchoScale,
        Column::MaxHits,
        Column::SleepChance,
        Column::SleepTurns,
        Column::ArmorBreak,
        Column::FreezeChance,
        Column::FreezeTurns,
        Column::SplashCount,
        Column::PoisonTurns,
        Column::PoisonPerTurn,
        Column::ShieldScaleStat,
        Column::ShieldScale,
        Column::RageGain,
        Column::MaxTargets,
        Column::SelfAtkBuff,
        Column::AssistRate,
        Column::EvadeBuff,
        Column::AtkBuff,
        Column::BuffStats,
        Column::ArmorPen,
        Column::KillRage,
        Column::DiseaseTurns,
        Column::DiseaseDamage,
    ];

    /// Duration columns, each counted in turns.
    pub const DURATIONS: [Column; 8] = [
        Column::Turns,
        Column::TauntTurns,
        Column::StunTurns,
        Column::ReflectTurns,
        Column::SleepTurns,
        Column::FreezeTurns,
        Column::PoisonTurns,
        Column::DiseaseTurns,
    ];

    /// Columns holding a fraction that descriptions quote as a percentage.
    pub const RATIOS: [Column; 9] = [
        Column::StunChance,
        Column::SleepChance,
        Column::FreezeChance,
        Column::ReflectPct,
        Column::Lifesteal,
        Column::EvadeBuff,
        Column::AssistRate,
        Column::ArmorPen,
        Column::ShieldScale,
    ];

    /// Position in the header.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Header name as written in the dataset.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Name => "name",
            Column::DescriptionVi => "descriptionVi",
            Column::ActionPattern => "actionPattern",
            Column::Effect => "effect",
            Column::DamageType => "damageType",
            Column::Base => "base",
            Column::ScaleStat => "scaleStat",
            Column::Scale => "scale",
            Column::ShieldBase => "shieldBase",
            Column::TauntTurns => "tauntTurns",
            Column::StunChance => "stunChance",
            Column::StunTurns => "stunTurns",
            Column::ReflectPct => "reflectPct",
            Column::ReflectTurns => "reflectTurns",
            Column::ArmorBuff => "armorBuff",
            Column::MdefBuff => "mdefBuff",
            Column::Turns => "turns",
            Column::Hit1 => "hit1",
            Column::Hit2 => "hit2",
            Column::Lifesteal => "lifesteal",
            Column::EchoBase => "echoBase",
            Column::EchoScale => "echoScale",
            Column::MaxHits => "maxHits",
            Column::SleepChance => "sleepChance",
            Column::SleepTurns => "sleepTurns",
            Column::ArmorBreak => "armorBreak",
            Column::FreezeChance => "freezeChance",
            Column::FreezeTurns => "freezeTurns",
            Column::SplashCount => "splashCount",
            Column::PoisonTurns => "poisonTurns",
            Column::PoisonPerTurn => "poisonPerTurn",
            Column::ShieldScaleStat => "shieldScaleStat",
            Column::ShieldScale => "shieldScale",
            Column::RageGain => "rageGain",
            Column::MaxTargets => "maxTargets",
            Column::SelfAtkBuff => "selfAtkBuff",
            Column::AssistRate => "assistRate",
            Column::EvadeBuff => "evadeBuff",
            Column::AtkBuff => "atkBuff",
            Column::BuffStats => "buffStats",
            Column::ArmorPen => "armorPen",
            Column::KillRage => "killRage",
            Column::DiseaseTurns => "diseaseTurns",
            Column::DiseaseDamage => "diseaseDamage",
        }
    }

    #[must_use]
    pub const fn kind(self) -> ColumnKind {
        match self {
            Column::Id | Column::Name | Column::DescriptionVi | Column::Effect => ColumnKind::Text,
            Column::ActionPattern
            | Column::DamageType
            | Column::ScaleStat
            | Column::ShieldScaleStat => ColumnKind::Enum,
            Column::Hit1 | Column::Hit2 | Column::BuffStats => ColumnKind::Json,
            _ => ColumnKind::Number,
        }
    }

    /// The comma-joined header line.
    #[must_use]
    pub fn header() -> Vec<&'static str> {
        Column::ALL.iter().map(|c| c.name()).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name is not a schema column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl fmt::Display for UnknownColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown column '{}'", self.0)
    }
}

impl std::error::Error for UnknownColumn {}

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}
