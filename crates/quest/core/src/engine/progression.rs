//! Progression calculator: reward scaling and the level curve.
//!
//! All arithmetic is integer percent math so results are identical on
//! every platform. A weight of 100 is neutral; scaling by two weights is
//! one multiplication per weight followed by a single rounded division.

use crate::engine::EngineEvent;
use crate::state::Character;

/// Result of applying a reward to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressionOutcome {
    pub experience: u32,
    pub gold: u32,
    pub new_level: u32,
    pub level_up: bool,
}

/// Scales a base reward by a priority weight and a streak multiplier,
/// both in percent, rounding half up.
pub fn effective_reward(base: u32, priority_pct: u32, streak_pct: u32) -> u32 {
    let scaled = base as u64 * priority_pct as u64 * streak_pct as u64;
    ((scaled + 5_000) / 10_000) as u32
}

/// Derived level for a total experience amount.
///
/// Level n is reached at `50 * n * (n - 1)` total experience: the
/// cumulative form of a "level n to n+1 costs n * 100" curve. The
/// function is a monotonic step function of total experience and is the
/// single source of truth for the `level = f(experience_points)`
/// invariant.
pub fn level_for_experience(experience: u64) -> u32 {
    let mut level = 1u32;
    while experience_for_level(level + 1) <= experience {
        level += 1;
    }
    level
}

/// Total experience required to hold the given level.
pub fn experience_for_level(level: u32) -> u64 {
    let l = level as u64;
    50 * l * (l.saturating_sub(1))
}

/// Applies an experience/gold award to a character, recomputing the
/// derived level. Emits [`EngineEvent::LevelUp`] into `events` when the
/// level increases.
pub fn award(
    character: &mut Character,
    experience: u32,
    gold: u32,
    events: &mut Vec<EngineEvent>,
) -> ProgressionOutcome {
    let old_level = character.level;
    character.experience_points += experience as u64;
    character.gold += gold as u64;
    character.level = level_for_experience(character.experience_points);

    let level_up = character.level > old_level;
    if level_up {
        events.push(EngineEvent::LevelUp {
            from: old_level,
            to: character.level,
        });
    }
    ProgressionOutcome {
        experience,
        gold,
        new_level: character.level,
        level_up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OwnerId;

    #[test]
    fn worked_example_medium_high_streak_three() {
        // base 25 XP, priority weight 1.2, streak multiplier 1.3
        assert_eq!(effective_reward(25, 120, 130), 39);
        // matching gold path: base 12 -> 18.72 rounds to 19
        assert_eq!(effective_reward(12, 120, 130), 19);
    }

    #[test]
    fn neutral_weights_return_base() {
        assert_eq!(effective_reward(50, 100, 100), 50);
        assert_eq!(effective_reward(0, 135, 200), 0);
    }

    #[test]
    fn level_curve_steps() {
        // level 2 at 100 XP, level 3 at 300, level 4 at 600
        assert_eq!(level_for_experience(0), 1);
        assert_eq!(level_for_experience(99), 1);
        assert_eq!(level_for_experience(100), 2);
        assert_eq!(level_for_experience(299), 2);
        assert_eq!(level_for_experience(300), 3);
        assert_eq!(level_for_experience(600), 4);
    }

    #[test]
    fn curve_is_monotone() {
        let mut prev = 0;
        for xp in (0..5_000).step_by(37) {
            let level = level_for_experience(xp);
            assert!(level >= prev);
            prev = level;
        }
    }

    #[test]
    fn award_updates_level_and_emits_event() {
        let mut character = Character::new(OwnerId(1));
        character.experience_points = 90;
        character.level = level_for_experience(90);
        let mut events = Vec::new();

        let outcome = award(&mut character, 39, 19, &mut events);
        assert_eq!(character.experience_points, 129);
        assert_eq!(character.gold, 19);
        assert_eq!(outcome.new_level, 2);
        assert!(outcome.level_up);
        assert_eq!(events, vec![EngineEvent::LevelUp { from: 1, to: 2 }]);

        // Experience never decreases across awards.
        let before = character.experience_points;
        award(&mut character, 5, 0, &mut events);
        assert!(character.experience_points >= before);
        assert_eq!(
            character.level,
            level_for_experience(character.experience_points)
        );
    }
}
