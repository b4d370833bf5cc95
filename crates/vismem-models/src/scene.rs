//! Scene metadata and showrunner narrative context.

use serde::{Deserialize, Serialize};

/// Default mood when a scene does not declare one.
pub const DEFAULT_MOOD: &str = "neutral";

/// Scene metadata as stored by the planning layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneRecord {
    /// Scene identifier, unique within a project.
    pub id: String,

    /// Owning project.
    pub project_id: String,

    /// 1-based scene position within the episode.
    pub scene_number: u32,

    /// 1-based episode number.
    #[serde(default = "default_episode")]
    pub episode_number: u32,

    /// Free-text emotional mood of the scene, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
}

fn default_episode() -> u32 {
    1
}

/// Narrative context recorded by the showrunner step for a scene.
///
/// Used for emotional bookkeeping only; it never affects camera statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowrunnerDecision {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub where_we_came_from: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_must_change: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_defaults_to_one() {
        let scene: SceneRecord = serde_json::from_str(
            r#"{"id":"sc-1","project_id":"p-1","scene_number":3}"#,
        )
        .unwrap();
        assert_eq!(scene.episode_number, 1);
        assert!(scene.mood.is_none());
    }
}
