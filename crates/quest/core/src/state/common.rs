use std::fmt;

/// Unique identifier for a character aggregate owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerId(pub u64);

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "owner#{}", self.0)
    }
}

/// Unique identifier for a task within an aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Unique identifier for an achievement within an aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AchievementId(pub u64);

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "achievement#{}", self.0)
    }
}

/// Unique identifier for an inventory item within an aggregate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Unique identifier for a task category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category#{}", self.0)
    }
}

/// Point in time expressed as whole seconds since the Unix epoch.
///
/// The engine never reads a clock itself; callers supply timestamps with
/// every event, which keeps all transitions deterministic and replayable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    /// Seconds in one UTC day, used for day-window queries.
    pub const DAY_SECS: i64 = 86_400;

    pub const fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// Start of the UTC day containing this timestamp.
    pub fn day_start(self) -> Self {
        Self(self.0 - self.0.rem_euclid(Self::DAY_SECS))
    }

    /// Index of the fixed-length window containing this timestamp.
    ///
    /// Windows are anchored at the epoch; two timestamps fall in the same
    /// window iff their indices are equal.
    pub fn window_index(self, period_secs: u64) -> i64 {
        debug_assert!(period_secs > 0);
        self.0.div_euclid(period_secs as i64)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl std::ops::Add<i64> for Timestamp {
    type Output = Timestamp;
    fn add(self, rhs: i64) -> Timestamp {
        Timestamp(self.0 + rhs)
    }
}

impl std::ops::Sub<Timestamp> for Timestamp {
    type Output = i64;
    fn sub(self, rhs: Timestamp) -> i64 {
        self.0 - rhs.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_start_truncates_to_midnight() {
        let noon = Timestamp::new(3 * Timestamp::DAY_SECS + 43_200);
        assert_eq!(noon.day_start(), Timestamp::new(3 * Timestamp::DAY_SECS));
    }

    #[test]
    fn window_index_handles_pre_epoch() {
        assert_eq!(Timestamp::new(-1).window_index(86_400), -1);
        assert_eq!(Timestamp::new(0).window_index(86_400), 0);
        assert_eq!(Timestamp::new(86_400).window_index(86_400), 1);
    }
}
