//! Achievement evaluator.
//!
//! Evaluates every locked achievement's requirements against the current
//! aggregate snapshot, unlocks the ones that now hold, and applies their
//! rewards through the progression calculator. Unlocking is one-way: an
//! unlocked achievement is never re-evaluated, so conditions that later
//! turn false (an item is consumed, say) cannot revoke it.

use crate::engine::{EngineEvent, progression};
use crate::state::{AggregateSnapshot, Requirement, Timestamp};

/// True if a single requirement holds against the snapshot.
///
/// `Unknown` predicates fail closed: they are simply never satisfied.
pub fn satisfied(requirement: &Requirement, snapshot: &AggregateSnapshot) -> bool {
    match requirement {
        Requirement::ExperienceAtLeast(n) => snapshot.character.experience_points >= *n,
        Requirement::LevelAtLeast(n) => snapshot.character.level >= *n,
        Requirement::GoldAtLeast(n) => snapshot.character.gold >= *n,
        Requirement::CompletedTasksAtLeast { count, category } => {
            snapshot.completed_task_count(*category) >= *count
        }
        Requirement::OwnsItemOfRarity(rarity) => snapshot.owns_item_of_rarity(*rarity),
        Requirement::StreakAtLeast(n) => snapshot.best_streak() >= *n,
        Requirement::Unknown => false,
    }
}

/// True if all of an achievement's requirements hold at once.
///
/// An achievement with no recognizable requirements never unlocks;
/// vacuous truth would let corrupt definitions unlock instantly.
fn all_satisfied(requirements: &[Requirement], snapshot: &AggregateSnapshot) -> bool {
    !requirements.is_empty() && requirements.iter().all(|r| satisfied(r, snapshot))
}

/// Sweeps all locked achievements once, unlocking those whose
/// requirements hold against the snapshot as it stood when the sweep
/// started.
///
/// Rewards are applied as synthetic awards through the progression
/// calculator. The sweep is deliberately single-pass: an unlock's reward
/// cannot cascade into further unlocks within the same call, which keeps
/// evaluation non-re-entrant. Cascades surface on the next event.
pub fn sweep(snapshot: &mut AggregateSnapshot, now: Timestamp, events: &mut Vec<EngineEvent>) {
    let unlockable: Vec<_> = snapshot
        .locked_achievement_ids()
        .into_iter()
        .filter(|id| {
            snapshot
                .achievement(*id)
                .is_some_and(|a| all_satisfied(&a.requirements, snapshot))
        })
        .collect();

    for id in unlockable {
        let Some(achievement) = snapshot.achievement_mut(id) else {
            continue;
        };
        achievement.unlocked_at = Some(now);
        let experience = achievement.experience_reward;
        let gold = achievement.gold_reward;
        events.push(EngineEvent::AchievementUnlocked {
            achievement: id,
            at: now,
        });
        progression::award(&mut snapshot.character, experience, gold, events);
    }
}
