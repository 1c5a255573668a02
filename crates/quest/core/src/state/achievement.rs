//! Achievement entity and its closed requirement predicate set.

use crate::state::{AchievementId, CategoryId, OwnerId, Timestamp};

/// One unlock condition over the owning aggregate's state.
///
/// The predicate set is closed: content files map `(kind, threshold)`
/// entries onto these variants, and anything unrecognized becomes
/// [`Requirement::Unknown`], which never evaluates true. Corrupt or
/// forward-versioned content therefore fails closed instead of crashing
/// or blocking unrelated unlocks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Requirement {
    /// Total experience points reached the threshold.
    ExperienceAtLeast(u64),
    /// Derived level reached the threshold.
    LevelAtLeast(u32),
    /// Gold on hand reached the threshold.
    GoldAtLeast(u64),
    /// Completed task count reached the threshold, optionally restricted
    /// to one category.
    CompletedTasksAtLeast {
        count: u32,
        category: Option<CategoryId>,
    },
    /// The inventory holds at least one item of the given rarity or better.
    OwnsItemOfRarity(u32),
    /// Some task carries a streak of at least the threshold.
    StreakAtLeast(u32),
    /// Unrecognized predicate kind; never satisfied.
    Unknown,
}

/// A one-way unlockable reward owned by one character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    /// Absent until the requirements first evaluate true; never cleared.
    pub unlocked_at: Option<Timestamp>,
    pub experience_reward: u32,
    pub gold_reward: u32,
    /// All requirements must hold simultaneously for the unlock.
    pub requirements: Vec<Requirement>,
    pub user_id: OwnerId,
}

impl Achievement {
    pub fn new(
        id: AchievementId,
        user_id: OwnerId,
        name: impl Into<String>,
        requirements: Vec<Requirement>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            icon_url: None,
            unlocked_at: None,
            experience_reward: 50,
            gold_reward: 25,
            requirements,
            user_id,
        }
    }

    /// Overrides the unlock rewards (builder pattern).
    #[must_use]
    pub fn with_rewards(mut self, experience: u32, gold: u32) -> Self {
        self.experience_reward = experience;
        self.gold_reward = gold;
        self
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }
}
