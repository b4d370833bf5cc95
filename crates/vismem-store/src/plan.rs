//! Full planning payload for one scene.

use serde::{Deserialize, Serialize};

use vismem_models::{SceneRecord, ShotRecord, ShowrunnerDecision, StoryboardPanel};

/// Everything the planning layer knows about a scene.
///
/// Shots and storyboard panels are both optional lists: a scene early in
/// planning may carry only panels, or nothing at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePlan {
    pub scene: SceneRecord,

    #[serde(default)]
    pub shots: Vec<ShotRecord>,

    #[serde(default)]
    pub storyboard: Vec<StoryboardPanel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub showrunner: Option<ShowrunnerDecision>,
}
