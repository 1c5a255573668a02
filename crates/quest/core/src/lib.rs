//! Deterministic reward-and-progression logic for the quest tracker.
//!
//! `quest-core` defines the canonical rules (progression, streaks,
//! achievements, inventory) and exposes pure APIs for a surrounding
//! service to call. All state mutation flows through
//! [`engine::QuestEngine`], and supporting crates depend on the types
//! re-exported here. The crate performs no I/O and reads no clocks;
//! callers supply timestamps with every event.
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub use config::EngineConfig;
pub use engine::{EngineEvent, ProgressionOutcome, QuestEngine, StreakOutcome};
pub use error::{EngineError, ErrorKind};
pub use state::{
    Achievement, AchievementId, AggregateSnapshot, CategoryId, Character, Difficulty, EquipSlot,
    InventoryItem, ItemId, ItemType, OwnerId, Priority, Recurrence, Requirement, Task, TaskId,
    Timestamp,
};
