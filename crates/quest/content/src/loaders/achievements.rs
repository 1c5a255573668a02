//! Achievement catalog loader.
//!
//! Catalogs store requirements as `(kind, threshold)` data so files stay
//! forward-compatible: a kind this build does not recognize becomes the
//! fail-closed `Unknown` predicate instead of failing the whole load.

use std::path::Path;

use quest_core::{Achievement, AchievementId, CategoryId, OwnerId, Requirement};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One requirement entry as written in catalog files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementSpec {
    pub kind: String,
    #[serde(default)]
    pub threshold: u64,
    #[serde(default)]
    pub category: Option<u64>,
}

impl RequirementSpec {
    /// Maps the open on-disk representation onto the closed predicate set.
    pub fn into_requirement(self) -> Requirement {
        match self.kind.as_str() {
            "experience_at_least" => Requirement::ExperienceAtLeast(self.threshold),
            "level_at_least" => Requirement::LevelAtLeast(self.threshold as u32),
            "gold_at_least" => Requirement::GoldAtLeast(self.threshold),
            "completed_tasks_at_least" => Requirement::CompletedTasksAtLeast {
                count: self.threshold as u32,
                category: self.category.map(CategoryId),
            },
            "owns_item_of_rarity" => Requirement::OwnsItemOfRarity(self.threshold as u32),
            "streak_at_least" => Requirement::StreakAtLeast(self.threshold as u32),
            other => {
                tracing::warn!(kind = other, "unrecognized requirement kind, failing closed");
                Requirement::Unknown
            }
        }
    }
}

/// One achievement definition as written in catalog files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementSpec {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    pub experience_reward: u32,
    pub gold_reward: u32,
    pub requirements: Vec<RequirementSpec>,
}

impl AchievementSpec {
    /// Instantiates the definition for one owner, with a caller-assigned id.
    pub fn into_achievement(self, id: AchievementId, owner: OwnerId) -> Achievement {
        let requirements = self
            .requirements
            .into_iter()
            .map(RequirementSpec::into_requirement)
            .collect();
        let mut achievement = Achievement::new(id, owner, self.name, requirements)
            .with_rewards(self.experience_reward, self.gold_reward);
        achievement.description = self.description;
        achievement.icon_url = self.icon_url;
        achievement
    }
}

/// Catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementCatalog {
    pub achievements: Vec<AchievementSpec>,
}

/// Loader for achievement catalogs from RON files.
pub struct AchievementLoader;

impl AchievementLoader {
    /// Load achievement definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<AchievementSpec>> {
        let content = read_file(path)?;
        let catalog: AchievementCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse achievement catalog RON: {}", e))?;

        tracing::debug!(
            path = %path.display(),
            count = catalog.achievements.len(),
            "loaded achievement catalog"
        );
        Ok(catalog.achievements)
    }
}
