//! The per-scene visual memory record and its classification enums.
//!
//! One record is persisted per scene, keyed by `scene_id` with upsert
//! semantics. The `forbidden_next`/`recommended_next` constraint sets describe
//! the *next* scene: they are written into this scene's record so the next
//! scene's analysis can read them as "previous memory".

use serde::{Deserialize, Serialize};

/// Where the camera tends to sit relative to eye level across a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraHeightTendency {
    Low,
    Neutral,
    High,
    Mixed,
}

impl CameraHeightTendency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Neutral => "neutral",
            Self::High => "high",
            Self::Mixed => "mixed",
        }
    }
}

/// How fragmented or continuous a scene's shot breakdown is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageStyle {
    Fragmented,
    Clean,
    Mixed,
    Documentary,
}

impl CoverageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fragmented => "fragmented",
            Self::Clean => "clean",
            Self::Mixed => "mixed",
            Self::Documentary => "documentary",
        }
    }
}

/// Cutting speed classification derived from average shot duration.
///
/// Lower average duration means faster cutting, so the mapping is inverse:
/// long shots read as slow, short shots as frenetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacingLevel {
    Slow,
    Moderate,
    Fast,
    Frenetic,
}

impl PacingLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Moderate => "moderate",
            Self::Fast => "fast",
            Self::Frenetic => "frenetic",
        }
    }
}

/// A forbidden or recommended pattern set handed to the next scene.
///
/// All fields default to empty and are omitted from JSON when empty, so an
/// empty set serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lenses: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub movements: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shot_types: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

impl ConstraintSet {
    /// True when no pattern or reason has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
            && self.movements.is_empty()
            && self.shot_types.is_empty()
            && self.reasons.is_empty()
    }
}

/// The persisted visual memory for one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualMemoryRecord {
    pub project_id: String,
    pub scene_id: String,
    pub scene_number: u32,
    pub episode_number: u32,

    pub emotional_start: String,
    pub emotional_end: String,
    pub emotional_delta: String,

    /// Most frequent lens labels, frequency descending, at most three.
    pub dominant_lenses: Vec<String>,
    /// Most frequent camera movements, frequency descending, at most three.
    pub dominant_movements: Vec<String>,
    /// Most frequent shot types, frequency descending, at most three.
    pub dominant_shot_types: Vec<String>,

    pub camera_height_tendency: CameraHeightTendency,
    pub coverage_style: CoverageStyle,

    /// Mean shot duration, rounded to 2 decimals for storage.
    pub average_shot_duration_sec: f64,
    pub shot_count: u32,
    pub pacing_level: PacingLevel,

    /// Patterns the next scene must avoid.
    #[serde(default)]
    pub forbidden_next: ConstraintSet,
    /// Patterns the next scene should lean into.
    #[serde(default)]
    pub recommended_next: ConstraintSet,
}
