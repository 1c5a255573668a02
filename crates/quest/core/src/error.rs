//! Error types shared across the engine.
//!
//! Every operation is all-or-nothing: an error means the aggregate is
//! exactly as it was before the call. Errors are local and synchronous;
//! retry policy, if any, belongs to the caller.

use crate::state::{ItemId, TaskId};

/// Coarse classification of an [`EngineError`], mirroring the boundary
/// contract error kinds. Useful for mapping to transport-level codes
/// without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Re-completing a finished task.
    AlreadyCompleted,
    /// A level or prerequisite gate was not met.
    Requirement,
    /// Consuming more than is held.
    InsufficientQuantity,
    /// The operation does not apply to the target at all.
    InvalidOperation,
    /// The referenced entity does not exist in the aggregate.
    NotFound,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyCompleted => "already_completed",
            Self::Requirement => "requirement",
            Self::InsufficientQuantity => "insufficient_quantity",
            Self::InvalidOperation => "invalid_operation",
            Self::NotFound => "not_found",
        }
    }
}

/// Errors surfaced by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// Completion is not re-playable for a given task instance.
    #[error("{task} is already completed")]
    AlreadyCompleted { task: TaskId },

    /// Character level below the item's level requirement.
    #[error("{item} requires level {required}, character is level {level}")]
    LevelRequirement {
        item: ItemId,
        required: u32,
        level: u32,
    },

    /// A task cannot complete while any of its subtasks is open.
    #[error("{task} has {open} open subtask(s)")]
    SubtasksIncomplete { task: TaskId, open: usize },

    /// Consuming more units than the item holds.
    #[error("{item} holds {available}, cannot consume {requested}")]
    InsufficientQuantity {
        item: ItemId,
        requested: u32,
        available: u32,
    },

    /// The item kind does not occupy an equip slot.
    #[error("{item} is not equippable")]
    NotEquippable { item: ItemId },

    /// The item kind is not consumable.
    #[error("{item} is not consumable")]
    NotConsumable { item: ItemId },

    /// Consuming zero units is meaningless and rejected.
    #[error("consume amount must be at least 1")]
    ZeroConsume,

    /// Task not found in the aggregate.
    #[error("{0} not found")]
    TaskNotFound(TaskId),

    /// Item not found in the aggregate.
    #[error("{0} not found")]
    ItemNotFound(ItemId),

    /// Entity belongs to a different owner than the aggregate.
    #[error("entity owner does not match aggregate owner")]
    OwnerMismatch,

    /// Referenced parent task does not exist.
    #[error("parent {parent} not found")]
    ParentNotFound { parent: TaskId },

    /// Inserting the task would make it its own ancestor.
    #[error("{task} would become its own ancestor")]
    TaskCycle { task: TaskId },

    /// An entity with this id already exists in the aggregate.
    #[error("duplicate entity id")]
    DuplicateId,
}

impl EngineError {
    /// Returns the boundary-level classification of this error.
    pub const fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            AlreadyCompleted { .. } => ErrorKind::AlreadyCompleted,
            LevelRequirement { .. } | SubtasksIncomplete { .. } => ErrorKind::Requirement,
            InsufficientQuantity { .. } => ErrorKind::InsufficientQuantity,
            NotEquippable { .. } | NotConsumable { .. } | ZeroConsume | OwnerMismatch
            | TaskCycle { .. } | DuplicateId => ErrorKind::InvalidOperation,
            TaskNotFound(_) | ItemNotFound(_) | ParentNotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Returns a stable string identifier for this error variant, useful
    /// for categorization, metrics, and testing.
    pub const fn error_code(&self) -> &'static str {
        use EngineError::*;
        match self {
            AlreadyCompleted { .. } => "TASK_ALREADY_COMPLETED",
            LevelRequirement { .. } => "ITEM_LEVEL_REQUIREMENT",
            SubtasksIncomplete { .. } => "TASK_SUBTASKS_INCOMPLETE",
            InsufficientQuantity { .. } => "ITEM_INSUFFICIENT_QUANTITY",
            NotEquippable { .. } => "ITEM_NOT_EQUIPPABLE",
            NotConsumable { .. } => "ITEM_NOT_CONSUMABLE",
            ZeroConsume => "ITEM_ZERO_CONSUME",
            TaskNotFound(_) => "TASK_NOT_FOUND",
            ItemNotFound(_) => "ITEM_NOT_FOUND",
            OwnerMismatch => "AGGREGATE_OWNER_MISMATCH",
            ParentNotFound { .. } => "TASK_PARENT_NOT_FOUND",
            TaskCycle { .. } => "TASK_CYCLE",
            DuplicateId => "AGGREGATE_DUPLICATE_ID",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_boundary_contract() {
        let err = EngineError::AlreadyCompleted { task: TaskId(1) };
        assert_eq!(err.kind(), ErrorKind::AlreadyCompleted);

        let err = EngineError::LevelRequirement {
            item: ItemId(2),
            required: 10,
            level: 8,
        };
        assert_eq!(err.kind(), ErrorKind::Requirement);
        assert_eq!(err.kind().as_str(), "requirement");

        let err = EngineError::NotConsumable { item: ItemId(2) };
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
    }
}
