//! Shared data models for the visual continuity memory backend.
//!
//! This crate provides Serde-serializable types for:
//! - Shot records and storyboard panels (wire-level inputs)
//! - Normalized shot descriptors consumed by the analysis engine
//! - Scene metadata and showrunner decisions
//! - The per-scene visual memory record and its constraint sets

pub mod memory;
pub mod scene;
pub mod shot;

// Re-export common types
pub use memory::{
    CameraHeightTendency, ConstraintSet, CoverageStyle, PacingLevel, VisualMemoryRecord,
};
pub use scene::{SceneRecord, ShowrunnerDecision};
pub use shot::{ShotDescriptor, ShotRecord, StoryboardPanel};
