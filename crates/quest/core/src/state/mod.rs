//! Entity types and the aggregate snapshot they live in.

mod achievement;
mod character;
mod common;
mod item;
mod snapshot;
mod task;

pub use achievement::{Achievement, Requirement};
pub use character::Character;
pub use common::{AchievementId, CategoryId, ItemId, OwnerId, TaskId, Timestamp};
pub use item::{EquipSlot, InventoryItem, ItemType};
pub use snapshot::AggregateSnapshot;
pub use task::{Difficulty, Priority, Recurrence, Task};
