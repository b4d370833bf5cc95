//! The analyzer entry point: one scene in, one memory record out.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vismem_models::{
    CameraHeightTendency, ConstraintSet, CoverageStyle, PacingLevel, ShotDescriptor,
    ShowrunnerDecision, VisualMemoryRecord,
};

use crate::constraints::{generate_forbidden_next, generate_recommended_next};
use crate::stats::{camera_height_tendency, coverage_style, dominant_values, pacing_level, round2};

/// One analysis call: scene identity plus the normalized shot list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub project_id: String,
    pub scene_id: String,
    pub scene_number: u32,
    pub episode_number: u32,

    /// The scene's own declared mood, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,

    /// Normalized shots. May be empty: that is the minimal-record path, not
    /// an error.
    pub shots: Vec<ShotDescriptor>,
}

/// Analyze one scene's shot list and derive the memory record for it.
///
/// `prior` is the stored record for the previous scene in the same episode
/// (`scene_number - 1`), or None for a first scene or a lookup miss — both
/// mean no escalation data. `narrative` is the showrunner decision for this
/// scene and feeds emotional bookkeeping only.
///
/// Pure function: identical inputs always produce identical output, and the
/// caller owns persistence (upsert keyed by `scene_id`).
pub fn analyze(
    request: &AnalysisRequest,
    prior: Option<&VisualMemoryRecord>,
    narrative: Option<&ShowrunnerDecision>,
) -> VisualMemoryRecord {
    if request.shots.is_empty() {
        debug!(
            scene_id = %request.scene_id,
            "No shot data, returning minimal memory record"
        );
        return minimal_record(request);
    }

    let shots = &request.shots;

    let lens_labels: Vec<String> = shots.iter().map(|s| s.lens_label()).collect();
    let dominant_lenses = dominant_values(lens_labels.iter().map(|l| l.as_str()));
    let dominant_movements = dominant_values(shots.iter().map(|s| s.movement.as_str()));
    let dominant_shot_types = dominant_values(shots.iter().map(|s| s.shot_type.as_str()));

    let tendency = camera_height_tendency(shots);
    let coverage = coverage_style(shots);

    let total_duration: f64 = shots.iter().map(|s| s.duration_sec).sum();
    let average_duration = total_duration / shots.len() as f64;
    // Pacing classifies on the unrounded mean; storage gets 2 decimals
    let pacing = pacing_level(average_duration);

    let mood = request.mood.as_deref().unwrap_or("neutral");
    let emotional_start = narrative
        .and_then(|n| n.where_we_came_from.as_deref())
        .unwrap_or(mood)
        .to_string();
    let emotional_end = mood.to_string();
    let emotional_delta = match narrative.and_then(|n| n.what_must_change.as_deref()) {
        Some(change) => change.to_string(),
        None if emotional_start == emotional_end => "stable".to_string(),
        None => "transitional".to_string(),
    };

    let forbidden_next = generate_forbidden_next(
        &dominant_lenses,
        &dominant_movements,
        prior.map(|p| &p.forbidden_next),
    );
    let recommended_next =
        generate_recommended_next(&dominant_lenses, &dominant_movements, &emotional_delta);

    debug!(
        scene_id = %request.scene_id,
        shot_count = shots.len(),
        pacing = pacing.as_str(),
        coverage = coverage.as_str(),
        "Computed visual memory"
    );

    VisualMemoryRecord {
        project_id: request.project_id.clone(),
        scene_id: request.scene_id.clone(),
        scene_number: request.scene_number,
        episode_number: request.episode_number,
        emotional_start,
        emotional_end,
        emotional_delta,
        dominant_lenses,
        dominant_movements,
        dominant_shot_types,
        camera_height_tendency: tendency,
        coverage_style: coverage,
        average_shot_duration_sec: round2(average_duration),
        shot_count: shots.len() as u32,
        pacing_level: pacing,
        forbidden_next,
        recommended_next,
    }
}

/// Fixed safe default for scenes with no shot data.
///
/// Downstream consumers always see a fully populated record, so the empty
/// path hands back neutral, moderate defaults with empty constraint sets.
fn minimal_record(request: &AnalysisRequest) -> VisualMemoryRecord {
    VisualMemoryRecord {
        project_id: request.project_id.clone(),
        scene_id: request.scene_id.clone(),
        scene_number: request.scene_number,
        episode_number: request.episode_number,
        emotional_start: "neutral".to_string(),
        emotional_end: "neutral".to_string(),
        emotional_delta: "stable".to_string(),
        dominant_lenses: vec!["35mm".to_string()],
        dominant_movements: vec!["static".to_string()],
        dominant_shot_types: vec!["MS".to_string()],
        camera_height_tendency: CameraHeightTendency::Neutral,
        coverage_style: CoverageStyle::Clean,
        average_shot_duration_sec: 4.0,
        shot_count: 0,
        pacing_level: PacingLevel::Moderate,
        forbidden_next: ConstraintSet::default(),
        recommended_next: ConstraintSet::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(shots: Vec<ShotDescriptor>) -> AnalysisRequest {
        AnalysisRequest {
            project_id: "proj-1".to_string(),
            scene_id: "scene-7".to_string(),
            scene_number: 7,
            episode_number: 1,
            mood: Some("tense".to_string()),
            shots,
        }
    }

    fn shot(shot_type: &str, lens_mm: f64, movement: &str, duration_sec: f64) -> ShotDescriptor {
        ShotDescriptor {
            shot_type: shot_type.to_string(),
            lens_mm,
            movement: movement.to_string(),
            duration_sec,
            camera_height: "neutral".to_string(),
        }
    }

    #[test]
    fn test_empty_shot_list_yields_minimal_record() {
        let record = analyze(&request(Vec::new()), None, None);

        assert_eq!(record.dominant_lenses, vec!["35mm"]);
        assert_eq!(record.dominant_movements, vec!["static"]);
        assert_eq!(record.dominant_shot_types, vec!["MS"]);
        assert_eq!(record.camera_height_tendency, CameraHeightTendency::Neutral);
        assert_eq!(record.coverage_style, CoverageStyle::Clean);
        assert_eq!(record.average_shot_duration_sec, 4.0);
        assert_eq!(record.shot_count, 0);
        assert_eq!(record.pacing_level, PacingLevel::Moderate);
        assert!(record.forbidden_next.is_empty());
        assert!(record.recommended_next.is_empty());
        assert_eq!(record.emotional_delta, "stable");
    }

    #[test]
    fn test_minimal_record_ignores_scene_identity_values() {
        let mut a = request(Vec::new());
        a.scene_id = "x".to_string();
        a.episode_number = 4;
        let record = analyze(&a, None, None);
        assert_eq!(record.shot_count, 0);
        assert_eq!(record.pacing_level, PacingLevel::Moderate);
    }

    #[test]
    fn test_statistics_over_shot_list() {
        let shots = vec![
            shot("MS", 35.0, "static", 6.0),
            shot("CU", 50.0, "pan", 5.0),
            shot("MS", 35.0, "static", 7.0),
            shot("WS", 24.0, "static", 4.0),
            shot("MS", 50.0, "pan", 6.0),
            shot("CU", 35.0, "static", 8.0),
        ];
        let record = analyze(&request(shots), None, None);

        assert_eq!(record.dominant_lenses, vec!["35mm", "50mm", "24mm"]);
        assert_eq!(record.dominant_movements, vec!["static", "pan"]);
        assert_eq!(record.dominant_shot_types, vec!["MS", "CU", "WS"]);
        assert_eq!(record.shot_count, 6);
        assert_eq!(record.average_shot_duration_sec, 6.0);
        assert_eq!(record.pacing_level, PacingLevel::Moderate);
    }

    #[test]
    fn test_average_duration_rounded_for_storage() {
        let shots = vec![
            shot("MS", 35.0, "static", 1.0),
            shot("MS", 35.0, "static", 1.0),
            shot("MS", 35.0, "static", 2.0),
        ];
        let record = analyze(&request(shots), None, None);
        // 4/3 rounds to 1.33; pacing classifies on the unrounded mean
        assert_eq!(record.average_shot_duration_sec, 1.33);
        assert_eq!(record.pacing_level, PacingLevel::Frenetic);
    }

    #[test]
    fn test_emotional_context_from_narrative() {
        let narrative = ShowrunnerDecision {
            where_we_came_from: Some("calm".to_string()),
            what_must_change: Some("the dread must surface".to_string()),
        };
        let record = analyze(
            &request(vec![shot("MS", 35.0, "static", 4.0)]),
            None,
            Some(&narrative),
        );

        assert_eq!(record.emotional_start, "calm");
        assert_eq!(record.emotional_end, "tense");
        assert_eq!(record.emotional_delta, "the dread must surface");
    }

    #[test]
    fn test_emotional_delta_stable_vs_transitional() {
        // No narrative: start falls back to mood, so start == end => stable
        let record = analyze(&request(vec![shot("MS", 35.0, "static", 4.0)]), None, None);
        assert_eq!(record.emotional_start, "tense");
        assert_eq!(record.emotional_delta, "stable");

        // Narrative start differs from mood => transitional
        let narrative = ShowrunnerDecision {
            where_we_came_from: Some("calm".to_string()),
            what_must_change: None,
        };
        let record = analyze(
            &request(vec![shot("MS", 35.0, "static", 4.0)]),
            None,
            Some(&narrative),
        );
        assert_eq!(record.emotional_delta, "transitional");
    }

    #[test]
    fn test_mood_fallback_when_absent() {
        let mut req = request(vec![shot("MS", 35.0, "static", 4.0)]);
        req.mood = None;
        let record = analyze(&req, None, None);
        assert_eq!(record.emotional_start, "neutral");
        assert_eq!(record.emotional_end, "neutral");
        assert_eq!(record.emotional_delta, "stable");
    }

    #[test]
    fn test_forbidden_round_trip_across_scenes() {
        // Scene A dominated by 85mm tracking
        let scene_a = analyze(
            &request(vec![
                shot("CU", 85.0, "tracking", 3.0),
                shot("CU", 85.0, "tracking", 3.0),
            ]),
            None,
            None,
        );
        assert_eq!(scene_a.forbidden_next.lenses, vec!["85mm"]);
        assert_eq!(scene_a.forbidden_next.movements, vec!["tracking"]);

        // Scene B repeats the 85mm pattern; scene A's memory escalates it
        let mut req_b = request(vec![
            shot("MS", 85.0, "pan", 3.0),
            shot("MS", 85.0, "pan", 3.0),
        ]);
        req_b.scene_id = "scene-8".to_string();
        req_b.scene_number = 8;
        let scene_b = analyze(&req_b, Some(&scene_a), None);

        assert_eq!(scene_b.forbidden_next.lenses, vec!["85mm"]);
        assert!(scene_b
            .forbidden_next
            .reasons
            .iter()
            .any(|r| r.contains("repeated across scenes")));
    }

    #[test]
    fn test_recommended_lens_gap_at_35mm() {
        let record = analyze(
            &request(vec![shot("MS", 35.0, "pan", 4.0)]),
            None,
            None,
        );
        assert!(record.recommended_next.lenses.is_empty());
    }

    #[test]
    fn test_idempotence() {
        let req = request(vec![
            shot("MS", 35.0, "static", 6.0),
            shot("CU", 85.0, "tracking", 2.5),
            shot("WS", 24.0, "pan", 5.0),
        ]);
        let narrative = ShowrunnerDecision {
            where_we_came_from: Some("calm".to_string()),
            what_must_change: None,
        };

        let first = analyze(&req, None, Some(&narrative));
        let second = analyze(&req, None, Some(&narrative));

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
