//! Required-field lint per effect family.
//!
//! An effect tag implies which parameters the combat engine reads. A skill
//! that leaves one of them unset silently falls back to zero at runtime, so
//! each missing field is reported with a severity.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::registry::{DamageType, SkillDefinition, SkillRegistry};
use crate::schema::Column;

/// Effects resolved through the damage formula.
const DAMAGE_EFFECTS: &[&str] = &[
    "damage_shield_taunt",
    "single_burst",
    "assassin_execute_rage_refund",
    "double_hit",
    "double_hit_gold_reward",
    "single_burst_lifesteal",
    "single_delayed_echo",
    "cross_5",
    "row_multi",
    "single_sleep",
    "single_armor_break",
    "column_freeze",
    "aoe_circle",
    "column_plus_splash",
    "aoe_poison",
    "global_stun",
    "column_bleed",
    "self_atk_and_assist",
    "cone_smash",
    "true_single",
    "global_poison_team",
    "lifesteal_disease",
    "lifesteal_disease_maxhp",
    "knockback_charge",
    "cleave_armor_break",
    "single_strong_poison",
    "single_poison_stack",
    "random_multi",
    "single_poison_slow",
    "aoe_circle_stun",
    "single_bleed",
    "cone_shot",
    "global_debuff_atk",
    "single_burst_armor_pen",
    "global_knockback",
    "row_cleave",
];

#[derive(Debug, Clone, Copy)]
enum Requirement {
    /// Each listed column must be set.
    All(&'static [Column]),
    /// At least one listed column must be set.
    Any(&'static [Column]),
}

struct FamilyRule {
    family: &'static str,
    effects: &'static [&'static str],
    requirement: Requirement,
}

const FAMILY_RULES: &[FamilyRule] = &[
    FamilyRule {
        family: "shield cleanse",
        effects: &["shield_cleanse"],
        requirement: Requirement::Any(&[Column::ShieldBase, Column::ShieldScale]),
    },
    FamilyRule {
        family: "damage and shield",
        effects: &["damage_shield_taunt"],
        requirement: Requirement::All(&[Column::ShieldBase]),
    },
    FamilyRule {
        family: "heal",
        effects: &["dual_heal"],
        requirement: Requirement::Any(&[Column::Base, Column::Scale]),
    },
    FamilyRule {
        family: "double hit",
        effects: &["double_hit"],
        requirement: Requirement::All(&[Column::Hit1, Column::Hit2]),
    },
    FamilyRule {
        family: "metamorphosis",
        effects: &["metamorphosis"],
        requirement: Requirement::All(&[Column::BuffStats]),
    },
    FamilyRule {
        family: "stun",
        effects: &["global_stun", "aoe_circle_stun"],
        requirement: Requirement::All(&[Column::StunChance]),
    },
    FamilyRule {
        family: "poison",
        effects: &[
            "aoe_poison",
            "global_poison_team",
            "single_poison_stack",
            "single_strong_poison",
            "single_poison_slow",
        ],
        requirement: Requirement::All(&[Column::PoisonTurns, Column::PoisonPerTurn]),
    },
    FamilyRule {
        family: "freeze",
        effects: &["column_freeze"],
        requirement: Requirement::All(&[Column::FreezeChance]),
    },
    FamilyRule {
        family: "sleep",
        effects: &["single_sleep"],
        requirement: Requirement::All(&[Column::SleepChance, Column::SleepTurns]),
    },
    FamilyRule {
        family: "assist",
        effects: &["self_atk_and_assist"],
        requirement: Requirement::All(&[Column::SelfAtkBuff, Column::AssistRate]),
    },
    FamilyRule {
        family: "lifesteal",
        effects: &[
            "single_burst_lifesteal",
            "lifesteal_disease",
            "lifesteal_disease_maxhp",
        ],
        requirement: Requirement::All(&[Column::Lifesteal]),
    },
    FamilyRule {
        family: "disease",
        effects: &["lifesteal_disease", "lifesteal_disease_maxhp"],
        requirement: Requirement::All(&[Column::DiseaseTurns, Column::DiseaseDamage]),
    },
    FamilyRule {
        family: "armor break",
        effects: &[
            "single_armor_break",
            "cleave_armor_break",
            "single_burst_armor_pen",
        ],
        requirement: Requirement::Any(&[Column::ArmorBreak, Column::ArmorPen]),
    },
    FamilyRule {
        family: "timed buff",
        effects: &[
            "self_atk_and_assist",
            "ally_row_def_buff",
            "column_bless",
            "team_def_buff",
        ],
        requirement: Requirement::All(&[Column::Turns]),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The engine computes zero damage or similar broken output.
    Critical,
    /// Probably wrong logic.
    Warning,
    /// Basic metadata missing.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintFinding {
    pub skill_id: String,
    pub severity: Severity,
    /// Columns the finding is about.
    pub columns: Vec<Column>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub skills_checked: usize,
    pub findings: Vec<LintFinding>,
}

impl LintReport {
    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &LintFinding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Lint every skill in registry order.
pub fn lint_registry(registry: &SkillRegistry) -> LintReport {
    let mut report = LintReport::default();
    for skill in registry {
        report.skills_checked += 1;
        report.findings.extend(lint_skill(skill));
    }
    info!(
        skills = report.skills_checked,
        findings = report.findings.len(),
        "completeness lint complete"
    );
    report
}

pub fn lint_skill(skill: &SkillDefinition) -> Vec<LintFinding> {
    let mut findings = Vec::new();
    let mut push = |severity: Severity, columns: &[Column], message: String| {
        findings.push(LintFinding {
            skill_id: skill.id().to_string(),
            severity,
            columns: columns.to_vec(),
            message,
        });
    };

    let Some(effect) = skill.effect() else {
        push(Severity::Info, &[Column::Effect], "missing effect".to_string());
        if skill.action_pattern().is_none() {
            push(Severity::Info, &[Column::ActionPattern], "missing actionPattern".to_string());
        }
        return findings;
    };

    if skill.action_pattern().is_none() {
        push(Severity::Info, &[Column::ActionPattern], "missing actionPattern".to_string());
    }

    if DAMAGE_EFFECTS.contains(&effect) {
        let base = skill.raw(Column::Base).is_some();
        let scale = skill.raw(Column::Scale).is_some();
        match (base, scale) {
            (false, false) => push(
                Severity::Critical,
                &[Column::Base, Column::Scale],
                format!("damage effect '{effect}' has neither base nor scale; damage resolves to zero"),
            ),
            (false, true) => push(Severity::Warning, &[Column::Base], format!("damage effect '{effect}' is missing base")),
            (true, false) => push(Severity::Warning, &[Column::Scale], format!("damage effect '{effect}' is missing scale")),
            (true, true) => {}
        }

        if skill.damage_type() == Some(DamageType::Magic) && skill.scale_stat().is_none() {
            push(
                Severity::Warning,
                &[Column::ScaleStat],
                "magic damage without scaleStat falls back to atk; matk is likely intended".to_string(),
            );
        }
        if skill.raw(Column::DamageType).is_none() {
            push(Severity::Warning, &[Column::DamageType], format!("damage effect '{effect}' is missing damageType"));
        }
    }

    for rule in FAMILY_RULES.iter().filter(|r| r.effects.contains(&effect)) {
        match rule.requirement {
            Requirement::All(columns) => {
                for column in columns.iter().filter(|c| skill.raw(**c).is_none()) {
                    push(
                        Severity::Warning,
                        &[*column],
                        format!("{} skill is missing {column}", rule.family),
                    );
                }
            }
            Requirement::Any(columns) => {
                if columns.iter().all(|c| skill.raw(*c).is_none()) {
                    let names: Vec<&str> = columns.iter().map(|c| c.name()).collect();
                    push(
                        Severity::Warning,
                        columns,
                        format!("{} skill needs one of {}", rule.family, names.join(", ")),
                    );
                }
            }
        }
    }

    findings
}
