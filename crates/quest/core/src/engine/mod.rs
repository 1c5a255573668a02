//! Reward and progression engine.
//!
//! The [`QuestEngine`] is the authoritative reducer for an
//! [`AggregateSnapshot`]. Every operation is a pure, synchronous
//! transformation of (state, event) into (new state, emitted events);
//! nothing here performs I/O or reads a clock. The surrounding service
//! must serialize operations per owner, since the "at most one" invariants
//! (single equipped item per slot, one-way unlock, non-replayable
//! completion) assume one event at a time per aggregate.

pub mod achievements;
mod events;
pub mod inventory;
pub mod progression;
pub mod streak;

pub use events::EngineEvent;
pub use progression::ProgressionOutcome;
pub use streak::StreakOutcome;

use std::collections::BTreeMap;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::state::{AggregateSnapshot, InventoryItem, ItemId, TaskId, Timestamp};

/// Engine facade over one character aggregate.
///
/// Operations either return the full ordered event list they produced or
/// an error with the aggregate untouched (all-or-nothing per operation).
pub struct QuestEngine<'a> {
    snapshot: &'a mut AggregateSnapshot,
    config: &'a EngineConfig,
}

impl<'a> QuestEngine<'a> {
    pub fn new(snapshot: &'a mut AggregateSnapshot, config: &'a EngineConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn snapshot(&self) -> &AggregateSnapshot {
        self.snapshot
    }

    /// Marks a task completed and applies the full reward pipeline:
    /// effective reward -> character progression -> streak update ->
    /// achievement sweep.
    ///
    /// The reward multiplier uses the streak count stored on the task
    /// when the event arrives; the tracker then advances the count for
    /// the next occurrence. Completing an already-completed task is
    /// rejected with no state change, as is completing a task with open
    /// subtasks.
    pub fn complete_task(
        &mut self,
        id: TaskId,
        completed_at: Timestamp,
    ) -> Result<Vec<EngineEvent>, EngineError> {
        // Validate everything before the first mutation.
        let task = self.snapshot.task(id).ok_or(EngineError::TaskNotFound(id))?;
        if task.is_completed {
            return Err(EngineError::AlreadyCompleted { task: id });
        }
        let open = self.snapshot.open_subtasks(id);
        if open > 0 {
            return Err(EngineError::SubtasksIncomplete { task: id, open });
        }

        let task = self.snapshot.task(id).ok_or(EngineError::TaskNotFound(id))?;
        let priority_pct = self.config.priority_weight_pct(task.priority);
        let streak_pct = if task.is_recurring() {
            streak::multiplier_pct(task.streak_count, self.config)
        } else {
            100
        };
        let experience =
            progression::effective_reward(task.experience_reward, priority_pct, streak_pct);
        let gold = progression::effective_reward(task.gold_reward, priority_pct, streak_pct);

        let mut events = Vec::new();
        events.push(EngineEvent::TaskCompleted {
            task: id,
            experience,
            gold,
        });

        {
            let task = self
                .snapshot
                .task_mut(id)
                .ok_or(EngineError::TaskNotFound(id))?;
            match streak::update(task, completed_at) {
                StreakOutcome::Advanced(streak) => {
                    events.push(EngineEvent::StreakAdvanced { task: id, streak });
                }
                StreakOutcome::Reset => {
                    events.push(EngineEvent::StreakReset { task: id });
                }
                StreakOutcome::NotRecurring | StreakOutcome::Unchanged(_) => {}
            }
            task.is_completed = true;
            task.completed_at = Some(completed_at);
        }

        progression::award(&mut self.snapshot.character, experience, gold, &mut events);
        achievements::sweep(self.snapshot, completed_at, &mut events);
        Ok(events)
    }

    /// Reopens a task so a later completion is accepted.
    ///
    /// `completed_at` is deliberately preserved: for recurring tasks it is
    /// the previous-window marker the streak tracker compares against.
    pub fn reopen_task(&mut self, id: TaskId) -> Result<(), EngineError> {
        let task = self
            .snapshot
            .task_mut(id)
            .ok_or(EngineError::TaskNotFound(id))?;
        task.is_completed = false;
        Ok(())
    }

    /// Re-evaluates locked achievements outside of a completion, e.g.
    /// after inventory changes.
    pub fn evaluate_achievements(&mut self, now: Timestamp) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        achievements::sweep(self.snapshot, now, &mut events);
        events
    }

    pub fn acquire_item(&mut self, item: InventoryItem) -> Result<Vec<EngineEvent>, EngineError> {
        let mut events = Vec::new();
        inventory::acquire(self.snapshot, item, &mut events)?;
        Ok(events)
    }

    pub fn equip_item(&mut self, id: ItemId) -> Result<Vec<EngineEvent>, EngineError> {
        let mut events = Vec::new();
        inventory::equip(self.snapshot, id, &mut events)?;
        Ok(events)
    }

    pub fn unequip_item(&mut self, id: ItemId) -> Result<Vec<EngineEvent>, EngineError> {
        let mut events = Vec::new();
        inventory::unequip(self.snapshot, id, &mut events)?;
        Ok(events)
    }

    pub fn consume_item(&mut self, id: ItemId, amount: u32) -> Result<Vec<EngineEvent>, EngineError> {
        let mut events = Vec::new();
        inventory::consume(self.snapshot, id, amount, &mut events)?;
        Ok(events)
    }

    /// Derived stat totals over the current equip set.
    pub fn equipped_stat_totals(&self) -> BTreeMap<String, i64> {
        inventory::equipped_totals(self.snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        Achievement, AchievementId, Character, Difficulty, OwnerId, Priority, Recurrence,
        Requirement, Task,
    };

    fn fixture() -> (AggregateSnapshot, EngineConfig) {
        (
            AggregateSnapshot::new(Character::new(OwnerId(1))),
            EngineConfig::default(),
        )
    }

    fn task(id: u64, config: &EngineConfig) -> Task {
        Task::new(
            TaskId(id),
            OwnerId(1),
            format!("task {id}"),
            Difficulty::Medium,
            Priority::High,
            Timestamp::EPOCH,
            config,
        )
    }

    #[test]
    fn worked_example_from_completion_to_reward() {
        let (mut snap, config) = fixture();
        // medium base 25 XP / 12 gold, high priority 1.2, streak 3 -> 1.3
        let mut t = task(1, &config).with_recurrence(Recurrence::daily());
        t.streak_count = 3;
        snap.insert_task(t).unwrap();

        let mut engine = QuestEngine::new(&mut snap, &config);
        let events = engine.complete_task(TaskId(1), Timestamp::new(3_600)).unwrap();

        assert!(events.contains(&EngineEvent::TaskCompleted {
            task: TaskId(1),
            experience: 39,
            gold: 19,
        }));
        // First recorded completion advances the carried streak.
        assert!(events.contains(&EngineEvent::StreakAdvanced {
            task: TaskId(1),
            streak: 4,
        }));
        assert_eq!(snap.character.experience_points, 39);
        assert_eq!(snap.character.gold, 19);
        assert_eq!(snap.character.level, 1);
        assert_eq!(
            snap.character.level,
            progression::level_for_experience(snap.character.experience_points)
        );
    }

    #[test]
    fn double_completion_is_rejected_without_state_change() {
        let (mut snap, config) = fixture();
        snap.insert_task(task(1, &config)).unwrap();

        let mut engine = QuestEngine::new(&mut snap, &config);
        engine.complete_task(TaskId(1), Timestamp::new(10)).unwrap();

        let before = engine.snapshot().clone();
        let err = engine.complete_task(TaskId(1), Timestamp::new(20)).unwrap_err();
        assert_eq!(err, EngineError::AlreadyCompleted { task: TaskId(1) });
        assert_eq!(engine.snapshot(), &before);
    }

    #[test]
    fn open_subtasks_block_completion() {
        let (mut snap, config) = fixture();
        snap.insert_task(task(1, &config)).unwrap();
        snap.insert_task(task(2, &config).with_parent(TaskId(1))).unwrap();

        let mut engine = QuestEngine::new(&mut snap, &config);
        let err = engine.complete_task(TaskId(1), Timestamp::new(10)).unwrap_err();
        assert_eq!(
            err,
            EngineError::SubtasksIncomplete {
                task: TaskId(1),
                open: 1,
            }
        );

        engine.complete_task(TaskId(2), Timestamp::new(11)).unwrap();
        engine.complete_task(TaskId(1), Timestamp::new(12)).unwrap();
    }

    #[test]
    fn level_up_feeds_the_achievement_sweep() {
        let (mut snap, config) = fixture();
        snap.character.experience_points = 90;
        snap.character.level = 1;
        snap.insert_task(task(1, &config).with_rewards(25, 12)).unwrap();
        snap.insert_achievement(Achievement::new(
            AchievementId(1),
            OwnerId(1),
            "apprentice",
            vec![Requirement::LevelAtLeast(2)],
        ))
        .unwrap();

        let mut engine = QuestEngine::new(&mut snap, &config);
        // 25 * 1.2 = 30 XP, crossing the 100 XP threshold for level 2.
        let events = engine.complete_task(TaskId(1), Timestamp::new(10)).unwrap();

        assert!(events.contains(&EngineEvent::LevelUp { from: 1, to: 2 }));
        assert!(events.iter().any(|e| matches!(
            e,
            EngineEvent::AchievementUnlocked {
                achievement: AchievementId(1),
                ..
            }
        )));
        // Unlock reward (50 XP) applied on top of the task reward.
        assert_eq!(snap.character.experience_points, 90 + 30 + 50);
    }

    #[test]
    fn recurring_task_full_cycle_across_windows() {
        const DAY: i64 = Timestamp::DAY_SECS;
        let (mut snap, config) = fixture();
        snap.insert_task(
            task(1, &config).with_recurrence(Recurrence::daily()),
        )
        .unwrap();

        let mut engine = QuestEngine::new(&mut snap, &config);

        // Day 0: first completion starts the streak.
        let events = engine.complete_task(TaskId(1), Timestamp::new(3_600)).unwrap();
        assert!(events.contains(&EngineEvent::StreakAdvanced { task: TaskId(1), streak: 1 }));

        // Day 1: reopened and completed on schedule.
        engine.reopen_task(TaskId(1)).unwrap();
        let events = engine
            .complete_task(TaskId(1), Timestamp::new(DAY + 3_600))
            .unwrap();
        assert!(events.contains(&EngineEvent::StreakAdvanced { task: TaskId(1), streak: 2 }));

        // Day 4: two windows missed, the streak restarts.
        engine.reopen_task(TaskId(1)).unwrap();
        let events = engine
            .complete_task(TaskId(1), Timestamp::new(4 * DAY + 3_600))
            .unwrap();
        assert!(events.contains(&EngineEvent::StreakReset { task: TaskId(1) }));
        assert_eq!(snap.task(TaskId(1)).unwrap().streak_count, 1);
    }
}
