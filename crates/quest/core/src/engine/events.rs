//! Events emitted by engine operations.

use crate::state::{AchievementId, ItemId, TaskId, Timestamp};

/// Something observable that happened while applying an operation.
///
/// Events are returned to the caller in the order they occurred; the
/// engine never delivers them anywhere itself.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EngineEvent {
    /// A task completed and its effective reward was applied.
    TaskCompleted {
        task: TaskId,
        experience: u32,
        gold: u32,
    },

    /// The character's derived level increased.
    LevelUp { from: u32, to: u32 },

    /// A recurring task's streak grew by one.
    StreakAdvanced { task: TaskId, streak: u32 },

    /// A missed recurrence window reset the streak; this completion
    /// starts a new one.
    StreakReset { task: TaskId },

    /// A locked achievement's requirements first evaluated true.
    AchievementUnlocked {
        achievement: AchievementId,
        at: Timestamp,
    },

    /// An item entered the inventory.
    ItemAcquired { item: ItemId },

    /// An item was equipped; `replaced` is the item displaced from the
    /// same slot, if any.
    ItemEquipped {
        item: ItemId,
        replaced: Option<ItemId>,
    },

    /// An equipped item was unequipped.
    ItemUnequipped { item: ItemId },

    /// Consumable units were used up; the item is removed from the
    /// aggregate when `remaining` hits zero.
    ItemConsumed {
        item: ItemId,
        amount: u32,
        remaining: u32,
    },
}
