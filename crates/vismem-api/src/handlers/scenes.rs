//! Scene plan seeding handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use vismem_models::{SceneRecord, ShotRecord, ShowrunnerDecision, StoryboardPanel};
use vismem_store::ScenePlan;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request to store a scene plan (metadata, shots, storyboard, narrative).
#[derive(Debug, Deserialize, Validate)]
pub struct PutScenePlanRequest {
    #[validate(length(min = 1, message = "project_id is required"))]
    pub project_id: String,

    pub scene_number: u32,

    #[serde(default = "default_episode")]
    pub episode_number: u32,

    #[serde(default)]
    pub mood: Option<String>,

    #[serde(default)]
    pub shots: Vec<ShotRecord>,

    #[serde(default)]
    pub storyboard: Vec<StoryboardPanel>,

    #[serde(default)]
    pub showrunner: Option<ShowrunnerDecision>,
}

fn default_episode() -> u32 {
    1
}

/// Response for storing a scene plan.
#[derive(Serialize)]
pub struct PutScenePlanResponse {
    pub success: bool,
    pub scene_id: String,
    pub shot_count: u32,
    pub panel_count: u32,
}

/// Store (or replace) the plan for a scene.
pub async fn put_scene_plan(
    State(state): State<AppState>,
    Path(scene_id): Path<String>,
    Json(request): Json<PutScenePlanRequest>,
) -> ApiResult<Json<PutScenePlanResponse>> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(format!("Invalid request: {}", e)))?;
    if scene_id.trim().is_empty() {
        return Err(ApiError::bad_request("scene_id is required"));
    }

    let shot_count = request.shots.len() as u32;
    let panel_count = request.storyboard.len() as u32;

    let plan = ScenePlan {
        scene: SceneRecord {
            id: scene_id.clone(),
            project_id: request.project_id,
            scene_number: request.scene_number,
            episode_number: request.episode_number,
            mood: request.mood,
        },
        shots: request.shots,
        storyboard: request.storyboard,
        showrunner: request.showrunner,
    };

    state.planner.put_plan(plan).await?;

    info!(scene_id = %scene_id, shot_count, panel_count, "Stored scene plan");

    Ok(Json(PutScenePlanResponse {
        success: true,
        scene_id,
        shot_count,
        panel_count,
    }))
}
