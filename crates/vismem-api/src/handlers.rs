//! API handlers.

pub mod health;
pub mod scenes;
pub mod visual_memory;

pub use health::{health, ready};
