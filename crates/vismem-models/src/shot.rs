//! Shot-level input types.
//!
//! Two wire shapes feed the analyzer: true shot records from the shot store,
//! and storyboard panels used as a fallback when no shots exist yet. Both are
//! fully optional-field structs; `ShotDescriptor` is the normalized form with
//! every default filled in at the boundary.

use serde::{Deserialize, Serialize};

/// Default shot type when a record omits it.
pub const DEFAULT_SHOT_TYPE: &str = "MS";

/// Default camera movement when a record omits it.
pub const DEFAULT_MOVEMENT: &str = "static";

/// Default lens focal length in millimeters.
pub const DEFAULT_LENS_MM: f64 = 35.0;

/// Default shot duration in seconds.
pub const DEFAULT_DURATION_SEC: f64 = 4.0;

/// Default camera height. Storyboard panels never carry one.
pub const DEFAULT_CAMERA_HEIGHT: &str = "neutral";

/// A stored shot record as produced by upstream planning tools.
///
/// Every field is optional: callers routinely persist partial rows while a
/// scene is still being planned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens_mm: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_height: Option<String>,
}

/// A storyboard panel, used as shot data when no true shots exist for a scene.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoryboardPanel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_type: Option<String>,

    #[serde(
        default,
        alias = "suggested_lens",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggested_lens_mm: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_movement: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_estimate_sec: Option<f64>,
}

/// Normalized shot descriptor consumed by the analysis engine.
///
/// Ephemeral: built from records or panels for the duration of one analysis
/// call, with all defaults already applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotDescriptor {
    pub shot_type: String,
    pub lens_mm: f64,
    pub movement: String,
    pub duration_sec: f64,
    pub camera_height: String,
}

impl ShotDescriptor {
    /// Render the lens as its canonical label, e.g. `35mm`.
    pub fn lens_label(&self) -> String {
        format!("{}mm", self.lens_mm.round() as i64)
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => default.to_string(),
    }
}

impl From<ShotRecord> for ShotDescriptor {
    fn from(record: ShotRecord) -> Self {
        Self {
            shot_type: or_default(record.shot_type, DEFAULT_SHOT_TYPE),
            lens_mm: record.lens_mm.unwrap_or(DEFAULT_LENS_MM),
            movement: or_default(record.movement, DEFAULT_MOVEMENT),
            duration_sec: record.duration_sec.unwrap_or(DEFAULT_DURATION_SEC),
            camera_height: or_default(record.camera_height, DEFAULT_CAMERA_HEIGHT),
        }
    }
}

impl From<StoryboardPanel> for ShotDescriptor {
    fn from(panel: StoryboardPanel) -> Self {
        Self {
            shot_type: or_default(panel.shot_type, DEFAULT_SHOT_TYPE),
            lens_mm: panel.suggested_lens_mm.unwrap_or(DEFAULT_LENS_MM),
            movement: or_default(panel.camera_movement, DEFAULT_MOVEMENT),
            duration_sec: panel.duration_estimate_sec.unwrap_or(DEFAULT_DURATION_SEC),
            // Panels carry no camera height
            camera_height: DEFAULT_CAMERA_HEIGHT.to_string(),
        }
    }
}
