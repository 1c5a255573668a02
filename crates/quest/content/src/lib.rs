//! Data-driven content definitions and loaders.
//!
//! This crate houses static content for the quest tracker and provides
//! loaders for RON/TOML data files:
//! - Engine configuration (data-driven via TOML)
//! - Achievement catalogs (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//!
//! Content is consumed by the surrounding service when seeding an
//! aggregate and never appears in engine state directly. Requirement
//! kinds in achievement catalogs are open strings on disk; unrecognized
//! kinds are mapped to the fail-closed `Unknown` predicate rather than
//! rejecting the whole file.

pub mod loaders;

pub use loaders::{
    AchievementLoader, AchievementSpec, ConfigLoader, ItemLoader, ItemSpec, RequirementSpec,
};
