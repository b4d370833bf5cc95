//! Store interfaces for the visual continuity memory service.
//!
//! This crate provides:
//! - Async traits for the collaborator stores the analyzer's caller reads
//!   from (scenes, shots, storyboard panels, showrunner decisions) and writes
//!   to (visual memory records)
//! - An in-memory implementation used by the default server wiring and tests

pub mod error;
pub mod in_memory;
pub mod plan;
pub mod repos;

pub use error::{StoreError, StoreResult};
pub use in_memory::InMemoryStore;
pub use plan::ScenePlan;
pub use repos::{ScenePlanWriter, SceneStore, ShowrunnerStore, VisualMemoryStore};
