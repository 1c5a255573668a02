//! Streak tracker for recurring tasks.
//!
//! Windows are fixed-length buckets anchored at the epoch. A completion
//! in the bucket immediately after the previous completion extends the
//! streak; a completion two or more buckets later starts a new one. The
//! reward multiplier for a completion is read from the count stored on
//! the task when the event arrives; the tracker then updates the count
//! for the next occurrence.

use crate::config::EngineConfig;
use crate::state::{Recurrence, Task, Timestamp};

/// How a completion moved a task's streak.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StreakOutcome {
    /// Task is not recurring; the count was not touched.
    NotRecurring,
    /// Streak grew by one (or started at one on the first occurrence).
    Advanced(u32),
    /// A window was missed; the count reset to one.
    Reset,
    /// Completion landed in the same window as the previous one; the
    /// count is unchanged.
    Unchanged(u32),
}

/// Reward multiplier in percent for a given streak count:
/// `min(cap, 100 + streak * bonus_per_step)`, never below 100.
pub fn multiplier_pct(streak_count: u32, config: &EngineConfig) -> u32 {
    let raw = 100u64 + streak_count as u64 * config.streak_bonus_pct as u64;
    raw.min(config.streak_max_pct.max(100) as u64) as u32
}

/// Updates a task's streak count for a completion at `completed_at`.
///
/// The count never goes negative and never moves by more than one per
/// event. One-off tasks are left untouched.
pub fn update(task: &mut Task, completed_at: Timestamp) -> StreakOutcome {
    let period_secs = match task.recurrence {
        Recurrence::None => return StreakOutcome::NotRecurring,
        Recurrence::Every { period_secs } => period_secs,
    };

    match task.completed_at {
        // First occurrence counts as on-schedule.
        None => {
            task.streak_count = task.streak_count.saturating_add(1);
            StreakOutcome::Advanced(task.streak_count)
        }
        Some(previous) => {
            let prev_window = previous.window_index(period_secs);
            let this_window = completed_at.window_index(period_secs);
            match this_window - prev_window {
                0 => StreakOutcome::Unchanged(task.streak_count),
                1 => {
                    task.streak_count = task.streak_count.saturating_add(1);
                    StreakOutcome::Advanced(task.streak_count)
                }
                _ => {
                    task.streak_count = 1;
                    StreakOutcome::Reset
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Difficulty, OwnerId, Priority, TaskId};

    const DAY: i64 = Timestamp::DAY_SECS;

    fn daily_task() -> Task {
        Task::new(
            TaskId(1),
            OwnerId(1),
            "meditate",
            Difficulty::Easy,
            Priority::Low,
            Timestamp::EPOCH,
            &EngineConfig::default(),
        )
        .with_recurrence(Recurrence::daily())
    }

    #[test]
    fn multiplier_grows_then_caps() {
        let config = EngineConfig::default();
        assert_eq!(multiplier_pct(0, &config), 100);
        assert_eq!(multiplier_pct(3, &config), 130);
        assert_eq!(multiplier_pct(10, &config), 200);
        // Capped beyond the configured maximum.
        assert_eq!(multiplier_pct(50, &config), 200);

        let mut prev = 0;
        for streak in 0..30 {
            let pct = multiplier_pct(streak, &config);
            assert!(pct >= prev, "multiplier must be non-decreasing");
            prev = pct;
        }
    }

    #[test]
    fn consecutive_days_advance_the_streak() {
        let mut task = daily_task();
        assert_eq!(update(&mut task, Timestamp::new(3_600)), StreakOutcome::Advanced(1));
        task.completed_at = Some(Timestamp::new(3_600));

        assert_eq!(
            update(&mut task, Timestamp::new(DAY + 7_200)),
            StreakOutcome::Advanced(2)
        );
        task.completed_at = Some(Timestamp::new(DAY + 7_200));

        // Same-day duplicate completion does not double-count.
        assert_eq!(
            update(&mut task, Timestamp::new(DAY + 50_000)),
            StreakOutcome::Unchanged(2)
        );
        assert_eq!(task.streak_count, 2);
    }

    #[test]
    fn missed_window_resets_to_one() {
        let mut task = daily_task();
        task.streak_count = 6;
        task.completed_at = Some(Timestamp::new(3_600));

        // Two days later: one whole window was skipped.
        assert_eq!(
            update(&mut task, Timestamp::new(2 * DAY + 3_600)),
            StreakOutcome::Reset
        );
        assert_eq!(task.streak_count, 1);
    }

    #[test]
    fn one_off_tasks_never_mutate() {
        let mut task = daily_task();
        task.recurrence = Recurrence::None;
        task.streak_count = 4;
        assert_eq!(
            update(&mut task, Timestamp::new(DAY)),
            StreakOutcome::NotRecurring
        );
        assert_eq!(task.streak_count, 4);
    }
}
