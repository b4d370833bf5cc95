//! Visual continuity memory engine.
//!
//! Given a scene's shot list and the prior scene's stored memory, this crate
//! computes aggregate cinematographic statistics (dominant lens/movement/shot
//! type, pacing, coverage style, camera-height tendency) and derives the
//! forbidden/recommended constraint set for the *next* scene, so consecutive
//! scenes do not visually repeat themselves.
//!
//! The whole engine is pure and synchronous: no I/O, no shared state, and no
//! failure modes on well-formed input. Persistence and data fetching belong
//! to the caller.

pub mod analyzer;
pub mod constraints;
pub mod stats;

pub use analyzer::{analyze, AnalysisRequest};
pub use constraints::{generate_forbidden_next, generate_recommended_next};
pub use stats::{
    camera_height_tendency, coverage_style, dominant_values, pacing_level, round2,
};
