//! Character entity: the aggregate root.

use crate::state::OwnerId;

/// Progression state of one user, root of the owning aggregate.
///
/// `level` is derived from `experience_points` via the fixed curve in
/// [`crate::engine::progression::level_for_experience`]; the engine
/// recomputes it after every experience change. `experience_points` never
/// decreases except on an explicit reset by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub id: OwnerId,
    pub experience_points: u64,
    pub level: u32,
    pub gold: u64,
}

impl Character {
    /// Creates a fresh level-1 character with no experience or gold.
    pub fn new(id: OwnerId) -> Self {
        Self {
            id,
            experience_points: 0,
            level: 1,
            gold: 0,
        }
    }
}
