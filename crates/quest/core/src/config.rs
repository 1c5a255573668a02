use crate::state::{Difficulty, Priority};

/// Engine configuration constants and tunable parameters.
///
/// Base reward tables and priority weights are compile-time constants so
/// that replays stay deterministic; the streak knobs are runtime-tunable
/// because deployments balance them differently.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Streak bonus per consecutive completion, in percent of base reward.
    pub streak_bonus_pct: u32,

    /// Upper bound on the streak multiplier, in percent (100 = no bonus).
    pub streak_max_pct: u32,

    /// Gold reward as a percentage of the experience reward.
    pub gold_ratio_pct: u32,
}

impl EngineConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_STREAK_BONUS_PCT: u32 = 10;
    pub const DEFAULT_STREAK_MAX_PCT: u32 = 200;
    pub const DEFAULT_GOLD_RATIO_PCT: u32 = 50;

    pub fn new() -> Self {
        Self {
            streak_bonus_pct: Self::DEFAULT_STREAK_BONUS_PCT,
            streak_max_pct: Self::DEFAULT_STREAK_MAX_PCT,
            gold_ratio_pct: Self::DEFAULT_GOLD_RATIO_PCT,
        }
    }

    /// Base experience granted for completing a task of the given difficulty.
    pub const fn base_experience(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Trivial => 5,
            Difficulty::Easy => 10,
            Difficulty::Medium => 25,
            Difficulty::Hard => 50,
            Difficulty::Epic => 100,
        }
    }

    /// Base gold granted for completing a task of the given difficulty.
    pub const fn base_gold(&self, difficulty: Difficulty) -> u32 {
        self.base_experience(difficulty) * self.gold_ratio_pct / 100
    }

    /// Reward weight of a priority, in percent (100 = neutral).
    pub const fn priority_weight_pct(&self, priority: Priority) -> u32 {
        match priority {
            Priority::Low => 100,
            Priority::Medium => 110,
            Priority::High => 120,
            Priority::Critical => 135,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_weights_are_monotonic_and_at_least_neutral() {
        let config = EngineConfig::default();
        let ladder = [
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Critical,
        ];
        let mut prev = 0;
        for priority in ladder {
            let weight = config.priority_weight_pct(priority);
            assert!(weight >= 100);
            assert!(weight > prev);
            prev = weight;
        }
    }
}
