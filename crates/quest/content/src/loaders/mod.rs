//! Content loaders for reading quest data from files.
//!
//! All loaders parse into plain spec structs and convert to `quest-core`
//! types, assigning ids and owners at conversion time so one catalog can
//! seed many aggregates.

pub mod achievements;
pub mod config;
pub mod items;

pub use achievements::{AchievementLoader, AchievementSpec, RequirementSpec};
pub use config::ConfigLoader;
pub use items::{ItemLoader, ItemSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
