use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::audit::{AuditPolicy, TierPolicy};
use crate::error::{CatalogError, Result};

pub const CONFIG_ENV: &str = "SKILLCAT_CONFIG";
pub const PROJECT_CONFIG_FILE: &str = "skillcat.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration layered as defaults, then file(s), then environment.
    ///
    /// An explicit path (or `SKILLCAT_CONFIG`) replaces the global and project
    /// files; it is not merged with them.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => {
                    return Err(CatalogError::MissingConfig(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
            }
        } else {
            if let Some(global) = Self::load_global() {
                config.merge_patch(global?);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Option<Result<ConfigPatch>> {
        let path = dirs::config_dir()?.join("skillcat/config.toml");
        Self::load_patch(&path).transpose()
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| CatalogError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| CatalogError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.paths {
            self.paths.merge(patch);
        }
        if let Some(patch) = patch.audit {
            self.audit.merge(patch);
        }
        if let Some(patch) = patch.output {
            self.output.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let env = Env(lookup);

        if let Some(value) = env.string("SKILLCAT_SKILLS_PATH") {
            self.paths.skills = PathBuf::from(value);
        }
        if let Some(value) = env.string("SKILLCAT_UNITS_PATH") {
            self.paths.units = PathBuf::from(value);
        }
        if let Some(value) = env.string("SKILLCAT_CATALOGUE_PATH") {
            self.paths.catalogue = PathBuf::from(value);
        }
        if let Some(value) = env.string("SKILLCAT_REPORT_PATH") {
            self.paths.report = Some(PathBuf::from(value));
        }

        if let Some(value) = env.string("SKILLCAT_TIER_POLICY") {
            self.audit.tier_policy = value.parse().map_err(|err| {
                CatalogError::Config(format!("invalid SKILLCAT_TIER_POLICY value {value}: {err}"))
            })?;
        }
        if let Some(value) = env.bool("SKILLCAT_FLAG_UNMENTIONED") {
            self.audit.flag_unmentioned = value;
        }

        if let Some(value) = env.string("SKILLCAT_OUTPUT_FORMAT") {
            self.output.format = value;
        }
        if let Some(value) = env.bool("SKILLCAT_COLOR") {
            self.output.color = value;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Skill dataset written by `build` and read by every other command.
    #[serde(default = "default_skills_path")]
    pub skills: PathBuf,
    /// Unit roster used by `link` and `audit --units`.
    #[serde(default = "default_units_path")]
    pub units: PathBuf,
    /// Authoring catalogue read by `build`.
    #[serde(default = "default_catalogue_path")]
    pub catalogue: PathBuf,
    /// When set, `audit` also writes its text report here.
    #[serde(default)]
    pub report: Option<PathBuf>,
}

fn default_skills_path() -> PathBuf {
    PathBuf::from("data/skills.csv")
}

fn default_units_path() -> PathBuf {
    PathBuf::from("data/units.csv")
}

fn default_catalogue_path() -> PathBuf {
    PathBuf::from("data/skills.toml")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_path(),
            units: default_units_path(),
            catalogue: default_catalogue_path(),
            report: None,
        }
    }
}

impl PathsConfig {
    fn merge(&mut self, patch: PathsPatch) {
        if let Some(value) = patch.skills {
            self.skills = value;
        }
        if let Some(value) = patch.units {
            self.units = value;
        }
        if let Some(value) = patch.catalogue {
            self.catalogue = value;
        }
        if let Some(value) = patch.report {
            self.report = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub tier_policy: TierPolicy,
    /// Report binding tiers whose text never states the audited quantity.
    #[serde(default)]
    pub flag_unmentioned: bool,
}

impl AuditConfig {
    fn merge(&mut self, patch: AuditPatch) {
        if let Some(value) = patch.tier_policy {
            self.tier_policy = value;
        }
        if let Some(value) = patch.flag_unmentioned {
            self.flag_unmentioned = value;
        }
    }

    pub fn policy(&self) -> AuditPolicy {
        AuditPolicy {
            tier_policy: self.tier_policy,
            flag_unmentioned: self.flag_unmentioned,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_format() -> String {
    "human".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: default_color(),
        }
    }
}

impl OutputConfig {
    fn merge(&mut self, patch: OutputPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.color {
            self.color = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    pub paths: Option<PathsPatch>,
    pub audit: Option<AuditPatch>,
    pub output: Option<OutputPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PathsPatch {
    pub skills: Option<PathBuf>,
    pub units: Option<PathBuf>,
    pub catalogue: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuditPatch {
    pub tier_policy: Option<TierPolicy>,
    pub flag_unmentioned: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OutputPatch {
    pub format: Option<String>,
    pub color: Option<bool>,
}

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn string(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn bool(&self, key: &str) -> Option<bool> {
        self.string(key).map(|value| {
            matches!(
                value.to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            )
        })
    }
}
