//! Visual memory API handlers.
//!
//! The analyze handler is the service's core operation: it assembles shot
//! data for a scene, runs the pure analysis engine, persists the resulting
//! memory record, and hands back the constraints computed for the next scene.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use vismem_engine::AnalysisRequest;
use vismem_models::{
    CameraHeightTendency, ConstraintSet, CoverageStyle, PacingLevel, ShotDescriptor, ShotRecord,
    StoryboardPanel, VisualMemoryRecord,
};

use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::state::AppState;

// ============================================================================
// Analyze
// ============================================================================

/// Request to analyze one scene's visual continuity.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeVisualMemoryRequest {
    #[validate(length(min = 1, message = "project_id is required"))]
    pub project_id: String,

    #[validate(length(min = 1, message = "scene_id is required"))]
    pub scene_id: String,

    pub scene_number: u32,

    #[serde(default = "default_episode")]
    pub episode_number: u32,

    /// Inline shot data. When present, stored shots are not consulted.
    #[serde(default)]
    pub shots_data: Option<Vec<ShotRecord>>,

    /// Inline storyboard panels, used when no shots are available.
    #[serde(default)]
    pub storyboard_data: Option<Vec<StoryboardPanel>>,
}

fn default_episode() -> u32 {
    1
}

/// Which input fed the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Empty shot list: the fixed minimal record was returned.
    Minimal,
    /// Statistics were computed from shot or storyboard data.
    Computed,
}

impl AnalysisSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Computed => "computed",
        }
    }
}

/// Statistical summary echoed alongside the full record.
#[derive(Debug, Serialize)]
pub struct AnalysisSummary {
    pub dominant_lenses: Vec<String>,
    pub dominant_movements: Vec<String>,
    pub dominant_shot_types: Vec<String>,
    pub camera_height_tendency: CameraHeightTendency,
    pub coverage_style: CoverageStyle,
    pub average_shot_duration_sec: f64,
    pub shot_count: u32,
    pub pacing_level: PacingLevel,
    pub emotional_delta: String,
}

impl From<&VisualMemoryRecord> for AnalysisSummary {
    fn from(record: &VisualMemoryRecord) -> Self {
        Self {
            dominant_lenses: record.dominant_lenses.clone(),
            dominant_movements: record.dominant_movements.clone(),
            dominant_shot_types: record.dominant_shot_types.clone(),
            camera_height_tendency: record.camera_height_tendency,
            coverage_style: record.coverage_style,
            average_shot_duration_sec: record.average_shot_duration_sec,
            shot_count: record.shot_count,
            pacing_level: record.pacing_level,
            emotional_delta: record.emotional_delta.clone(),
        }
    }
}

/// Constraints handed to the next scene's planning step.
#[derive(Debug, Serialize)]
pub struct ConstraintsForNext {
    pub forbidden: ConstraintSet,
    pub recommended: ConstraintSet,
}

/// Response for the analyze operation.
#[derive(Debug, Serialize)]
pub struct AnalyzeVisualMemoryResponse {
    pub success: bool,
    pub source: AnalysisSource,
    pub shots_analyzed: u32,
    pub duration_ms: u64,
    pub memory: VisualMemoryRecord,
    pub analysis: AnalysisSummary,
    pub constraints_for_next: ConstraintsForNext,
}

/// Analyze a scene's shot list and persist its visual memory record.
///
/// Shot resolution order: inline `shots_data`, stored shots, inline
/// `storyboard_data`, stored storyboard panels. An empty result is not an
/// error; it produces the minimal default record.
pub async fn analyze_visual_memory(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeVisualMemoryRequest>,
) -> ApiResult<Json<AnalyzeVisualMemoryResponse>> {
    let start = Instant::now();

    request
        .validate()
        .map_err(|e| ApiError::bad_request(format!("Invalid request: {}", e)))?;
    if request.project_id.trim().is_empty() || request.scene_id.trim().is_empty() {
        return Err(ApiError::bad_request("project_id and scene_id are required"));
    }

    // Scene metadata supplies the mood; a lookup miss is tolerated since the
    // request already carries the scene's position.
    let scene = state
        .scenes
        .get_scene(&request.project_id, &request.scene_id)
        .await
        .map_err(|e| {
            warn!("Scene lookup failed: {}", e);
            e
        })?;
    let mood = scene.and_then(|s| s.mood);

    let shots = resolve_shots(&state, &request).await?;

    let narrative = state
        .showrunner
        .decision_for_scene(&request.scene_id)
        .await?;

    // Previous scene's memory, for escalation. First scene or lookup miss
    // both mean no escalation data.
    let prior = match request.scene_number.checked_sub(1) {
        Some(prev) if prev >= 1 => {
            state
                .memories
                .get_by_position(&request.project_id, request.episode_number, prev)
                .await?
        }
        _ => None,
    };

    let analysis_request = AnalysisRequest {
        project_id: request.project_id.clone(),
        scene_id: request.scene_id.clone(),
        scene_number: request.scene_number,
        episode_number: request.episode_number,
        mood,
        shots,
    };

    let source = if analysis_request.shots.is_empty() {
        AnalysisSource::Minimal
    } else {
        AnalysisSource::Computed
    };
    let shots_analyzed = analysis_request.shots.len() as u32;

    let record = vismem_engine::analyze(&analysis_request, prior.as_ref(), narrative.as_ref());

    state.memories.upsert(record.clone()).await.map_err(|e| {
        warn!(
            scene_id = %request.scene_id,
            duration_ms = start.elapsed().as_millis() as u64,
            "Failed to persist visual memory record: {}", e
        );
        e
    })?;

    let duration_ms = start.elapsed().as_millis() as u64;
    metrics::record_analysis(source.as_str(), shots_analyzed, start.elapsed().as_secs_f64());

    info!(
        scene_id = %request.scene_id,
        source = source.as_str(),
        shots_analyzed,
        duration_ms,
        "Analyzed scene visual memory"
    );

    let analysis = AnalysisSummary::from(&record);
    let constraints_for_next = ConstraintsForNext {
        forbidden: record.forbidden_next.clone(),
        recommended: record.recommended_next.clone(),
    };

    Ok(Json(AnalyzeVisualMemoryResponse {
        success: true,
        source,
        shots_analyzed,
        duration_ms,
        memory: record,
        analysis,
        constraints_for_next,
    }))
}

/// Assemble the normalized shot list for a scene.
async fn resolve_shots(
    state: &AppState,
    request: &AnalyzeVisualMemoryRequest,
) -> ApiResult<Vec<ShotDescriptor>> {
    // Inline shots win over stored shots
    let shot_records = match &request.shots_data {
        Some(shots) if !shots.is_empty() => shots.clone(),
        _ => state.scenes.shots_for_scene(&request.scene_id).await?,
    };

    if !shot_records.is_empty() {
        return Ok(shot_records.into_iter().map(Into::into).collect());
    }

    // Storyboard fallback: panels approximate shots, without camera height
    let panels = match &request.storyboard_data {
        Some(panels) if !panels.is_empty() => panels.clone(),
        _ => state.scenes.storyboard_for_scene(&request.scene_id).await?,
    };

    Ok(panels.into_iter().map(Into::into).collect())
}

// ============================================================================
// Read endpoints
// ============================================================================

/// Get the stored visual memory record for a scene.
pub async fn get_scene_memory(
    State(state): State<AppState>,
    Path(scene_id): Path<String>,
) -> ApiResult<Json<VisualMemoryRecord>> {
    let record = state
        .memories
        .get_by_scene(&scene_id)
        .await?
        .ok_or_else(|| ApiError::not_found("No visual memory for this scene"))?;

    Ok(Json(record))
}

/// Response for listing a project's memory records.
#[derive(Serialize)]
pub struct ProjectMemoryResponse {
    pub records: Vec<VisualMemoryRecord>,
}

/// List a project's visual memory records ordered by (episode, scene).
pub async fn list_project_memory(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> ApiResult<Json<ProjectMemoryResponse>> {
    let records = state.memories.list_for_project(&project_id).await?;
    Ok(Json(ProjectMemoryResponse { records }))
}
