use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::dataset::catalogue;
use crate::registry::SkillRegistry;

/// A small catalogue covering four roles.
///
/// Under the baseline policy it yields one discrepancy (`fireball` tier 1
/// maxTargets), three tier notes and one empty-description gap (`volley`).
/// Lint finds one warning (`volley` is missing hit2).
pub const SAMPLE_CATALOGUE: &str = r#"[[tanker]]
id = "bear_roar"
name = "Gầm Thét"
descriptionVi = "1★ giảm 15%ATK kẻ địch 3 lượt 1 mục tiêu; 2★ giảm 20%ATK 3 lượt 2 mục tiêu; 3★ giảm 25%ATK 4 lượt 3 mục tiêu"
actionPattern = "SELF"
effect = "roar_debuff"
turns = "3"
maxTargets = "1"

[[mage]]
id = "fireball"
name = "Cầu Lửa"
descriptionVi = "1★ gây 140% MATK lên 2 mục tiêu; 2★ gây 160% MATK lên 2 mục tiêu; 3★ gây 180% MATK lên 3 mục tiêu"
actionPattern = "RANGED_STATIC"
effect = "row_multi"
damageType = "magic"
base = "20"
scaleStat = "matk"
scale = "1.4"
maxTargets = "3"

[[archer]]
id = "volley"
name = "Mưa Tên"
actionPattern = "RANGED_STATIC"
effect = "double_hit"
damageType = "physical"
base = "10"
scale = "0.8"
hit1 = { ratio = 0.6 }

[[support]]
id = "healing_rain"
name = "Mưa Hồi Phục"
descriptionVi = "1★ toàn đội hồi 20%HP; 2★ toàn đội hồi 25%HP; 3★ toàn đội hồi 30%HP"
actionPattern = "SELF"
effect = "dual_heal"
base = "30"
scale = "0.5"
"#;

/// Roster for [`SAMPLE_CATALOGUE`]; `hawk` references a skill that does not exist.
pub const SAMPLE_ROSTER: &str = "id,name,classType,tier,skillId
bear,Gấu,TANKER,1,bear_roar
fox,Cáo,MAGE,2,fireball
owl,Cú,SUPPORT,3,healing_rain
hawk,Ưng,ARCHER,2,arrow_storm
";

/// Registry built from [`SAMPLE_CATALOGUE`].
pub fn sample_registry() -> SkillRegistry {
    catalogue::from_toml(SAMPLE_CATALOGUE)
        .and_then(|c| c.build())
        .expect("sample catalogue builds")
}

/// Test fixture providing an isolated project directory.
pub struct CatalogFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl CatalogFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Fixture with the sample catalogue and roster under `data/`.
    pub fn with_samples() -> Self {
        let fixture = Self::new();
        fixture.create_file("data/skills.toml", SAMPLE_CATALOGUE);
        fixture.create_file("data/units.csv", SAMPLE_ROSTER);
        fixture
    }

    pub fn path(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Create a file with content, creating parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn read(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.path(relative_path)).expect("Failed to read file")
    }

    pub fn exists(&self, relative_path: &str) -> bool {
        Path::new(&self.path(relative_path)).exists()
    }
}

impl Default for CatalogFixture {
    fn default() -> Self {
        Self::new()
    }
}
