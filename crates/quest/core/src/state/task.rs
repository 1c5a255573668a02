//! Task entity and its ordered property enums.

use crate::config::EngineConfig;
use crate::state::{CategoryId, OwnerId, TaskId, Timestamp};

/// Urgency of a task, ordered from least to most urgent.
///
/// Priority scales the effective reward of a completion; the weight table
/// lives in [`EngineConfig::priority_weight_pct`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Effort class of a task, ordered from least to most demanding.
///
/// Difficulty fixes the base experience/gold reward at creation time; the
/// table lives in [`EngineConfig::base_experience`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Trivial,
    Easy,
    #[default]
    Medium,
    Hard,
    Epic,
}

/// Recurrence schedule of a task.
///
/// Recurring tasks participate in streak tracking; one-off tasks always use
/// the neutral reward multiplier and never touch `streak_count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Recurrence {
    /// One-off task, completed at most once.
    #[default]
    None,
    /// Repeats every fixed window of `period_secs` seconds.
    Every { period_secs: u64 },
}

impl Recurrence {
    /// Convenience constructor for daily recurrence.
    pub const fn daily() -> Self {
        Self::Every {
            period_secs: Timestamp::DAY_SECS as u64,
        }
    }
}

/// A unit of work owned by one character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub due_date: Option<Timestamp>,
    /// Most recent completion time. For recurring tasks this is carried
    /// across reopens so the streak tracker can compare windows.
    pub completed_at: Option<Timestamp>,
    pub is_completed: bool,
    pub priority: Priority,
    pub difficulty: Difficulty,
    pub experience_reward: u32,
    pub gold_reward: u32,
    pub streak_count: u32,
    pub recurrence: Recurrence,
    pub owner_id: OwnerId,
    pub parent_id: Option<TaskId>,
    pub category_id: Option<CategoryId>,
    /// Free-form tag names, unique per task.
    pub tags: Vec<String>,
}

impl Task {
    /// Creates an active task with rewards derived from its difficulty.
    pub fn new(
        id: TaskId,
        owner_id: OwnerId,
        title: impl Into<String>,
        difficulty: Difficulty,
        priority: Priority,
        created_at: Timestamp,
        config: &EngineConfig,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            created_at,
            due_date: None,
            completed_at: None,
            is_completed: false,
            priority,
            difficulty,
            experience_reward: config.base_experience(difficulty),
            gold_reward: config.base_gold(difficulty),
            streak_count: 0,
            recurrence: Recurrence::None,
            owner_id,
            parent_id: None,
            category_id: None,
            tags: Vec::new(),
        }
    }

    /// Sets the due date (builder pattern).
    #[must_use]
    pub fn with_due_date(mut self, due: Timestamp) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Sets the recurrence schedule (builder pattern).
    #[must_use]
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    /// Sets the parent task (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, parent: TaskId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Sets the category (builder pattern).
    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category_id = Some(category);
        self
    }

    /// Overrides the derived rewards (builder pattern).
    #[must_use]
    pub fn with_rewards(mut self, experience: u32, gold: u32) -> Self {
        self.experience_reward = experience;
        self.gold_reward = gold;
        self
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self.recurrence, Recurrence::None)
    }

    /// Adds a tag, keeping the tag set unique. Returns false on duplicates.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.iter().any(|t| *t == tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// True if the task is past its due date and still open.
    pub fn is_overdue(&self, now: Timestamp) -> bool {
        !self.is_completed && self.due_date.is_some_and(|due| due < now)
    }

    /// True if the task is open and due within the UTC day containing `now`.
    pub fn is_due_today(&self, now: Timestamp) -> bool {
        let day_start = now.day_start();
        let day_end = day_start + Timestamp::DAY_SECS;
        !self.is_completed
            && self
                .due_date
                .is_some_and(|due| due >= day_start && due < day_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64) -> Task {
        Task::new(
            TaskId(id),
            OwnerId(1),
            "write report",
            Difficulty::Medium,
            Priority::Medium,
            Timestamp::EPOCH,
            &EngineConfig::default(),
        )
    }

    #[test]
    fn rewards_are_monotonic_in_difficulty() {
        let config = EngineConfig::default();
        let ladder = [
            Difficulty::Trivial,
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Epic,
        ];
        for pair in ladder.windows(2) {
            assert!(config.base_experience(pair[0]) < config.base_experience(pair[1]));
            assert!(config.base_gold(pair[0]) < config.base_gold(pair[1]));
        }
    }

    #[test]
    fn tags_stay_unique() {
        let mut t = task(1);
        assert!(t.add_tag("work"));
        assert!(t.add_tag("deep"));
        assert!(!t.add_tag("work"));
        assert_eq!(t.tags, vec!["work".to_string(), "deep".to_string()]);
    }

    #[test]
    fn overdue_and_due_today_windows() {
        let day = Timestamp::DAY_SECS;
        let t = task(1).with_due_date(Timestamp::new(day + 3_600));

        // Morning of day 1: due later today, not overdue.
        let morning = Timestamp::new(day + 60);
        assert!(t.is_due_today(morning));
        assert!(!t.is_overdue(morning));

        // Day 2: overdue, no longer due today.
        let later = Timestamp::new(2 * day + 60);
        assert!(!t.is_due_today(later));
        assert!(t.is_overdue(later));
    }

    #[test]
    fn enum_wire_names_are_snake_case() {
        assert_eq!(Priority::Critical.to_string(), "critical");
        assert_eq!(Difficulty::Epic.to_string(), "epic");
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    }
}
