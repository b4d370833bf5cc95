//! Router-level tests against the in-memory store.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use vismem_api::{create_router, ApiConfig, AppState};

fn test_app() -> Router {
    create_router(AppState::in_memory(ApiConfig::default()), None)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_analyze_rejects_missing_identifiers() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "p1", "scene_id": "", "scene_number": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("scene_id"));

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "   ", "scene_id": "s1", "scene_number": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analyze_empty_scene_returns_minimal_record() {
    let app = test_app();

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "p1", "scene_id": "s1", "scene_number": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["source"], json!("minimal"));
    assert_eq!(body["shots_analyzed"], json!(0));
    assert_eq!(body["memory"]["pacing_level"], json!("moderate"));
    assert_eq!(body["memory"]["average_shot_duration_sec"], json!(4.0));
    assert_eq!(body["memory"]["dominant_lenses"], json!(["35mm"]));
    assert_eq!(body["constraints_for_next"]["forbidden"], json!({}));
    assert_eq!(body["constraints_for_next"]["recommended"], json!({}));
}

#[tokio::test]
async fn test_analyze_inline_shots_and_persistence() {
    let app = test_app();

    let shots = json!([
        { "shot_type": "CU", "lens_mm": 85.0, "movement": "tracking", "duration_sec": 3.0, "camera_height": "low" },
        { "shot_type": "CU", "lens_mm": 85.0, "movement": "tracking", "duration_sec": 3.0, "camera_height": "low angle" }
    ]);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({
            "project_id": "p1",
            "scene_id": "s1",
            "scene_number": 1,
            "shots_data": shots
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], json!("computed"));
    assert_eq!(body["shots_analyzed"], json!(2));
    assert_eq!(body["analysis"]["dominant_lenses"], json!(["85mm"]));
    assert_eq!(body["memory"]["camera_height_tendency"], json!("low"));
    assert_eq!(
        body["constraints_for_next"]["forbidden"]["lenses"],
        json!(["85mm"])
    );
    assert_eq!(
        body["constraints_for_next"]["recommended"]["lenses"],
        json!(["24mm", "28mm", "35mm"])
    );

    // Record persisted and readable
    let (status, stored) = get(&app, "/api/scenes/s1/visual-memory").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["scene_id"], json!("s1"));
    assert_eq!(stored["forbidden_next"]["lenses"], json!(["85mm"]));
}

#[tokio::test]
async fn test_get_memory_404_when_absent() {
    let app = test_app();
    let (status, _) = get(&app, "/api/scenes/nope/visual-memory").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_storyboard_fallback_from_seeded_plan() {
    let app = test_app();

    // Seed a scene with panels only
    let (status, _) = send_json(
        &app,
        "PUT",
        "/api/scenes/s1",
        json!({
            "project_id": "p1",
            "scene_number": 1,
            "mood": "tense",
            "storyboard": [
                { "shot_type": "WS", "suggested_lens_mm": 24.0, "camera_movement": "pan", "duration_estimate_sec": 6.0 },
                { "shot_type": "WS", "suggested_lens_mm": 24.0, "camera_movement": "pan", "duration_estimate_sec": 6.0 }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "p1", "scene_id": "s1", "scene_number": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], json!("computed"));
    assert_eq!(body["shots_analyzed"], json!(2));
    assert_eq!(body["analysis"]["dominant_lenses"], json!(["24mm"]));
    // Panels carry no camera height
    assert_eq!(body["memory"]["camera_height_tendency"], json!("neutral"));
    // Scene mood feeds emotional bookkeeping
    assert_eq!(body["memory"]["emotional_end"], json!("tense"));
}

#[tokio::test]
async fn test_escalation_across_consecutive_scenes() {
    let app = test_app();

    let shots = json!([
        { "shot_type": "CU", "lens_mm": 85.0, "movement": "pan", "duration_sec": 3.0 }
    ]);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "p1", "scene_id": "s1", "scene_number": 1, "shots_data": shots }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Scene 2 repeats the 85mm pattern
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "p1", "scene_id": "s2", "scene_number": 2, "shots_data": shots }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let reasons = body["constraints_for_next"]["forbidden"]["reasons"]
        .as_array()
        .unwrap();
    assert!(reasons
        .iter()
        .any(|r| r.as_str().unwrap().contains("repeated across scenes")));
}

#[tokio::test]
async fn test_project_listing_ordered() {
    let app = test_app();

    for (scene_id, scene_number) in [("b", 2), ("a", 1)] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/visual-memory/analyze",
            json!({ "project_id": "p1", "scene_id": scene_id, "scene_number": scene_number }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = get(&app, "/api/projects/p1/visual-memory").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["scene_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_reanalysis_overwrites_record() {
    let app = test_app();

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "p1", "scene_id": "s1", "scene_number": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let shots = json!([
        { "shot_type": "CU", "lens_mm": 50.0, "movement": "dolly", "duration_sec": 10.0 }
    ]);
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/visual-memory/analyze",
        json!({ "project_id": "p1", "scene_id": "s1", "scene_number": 1, "shots_data": shots }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, stored) = get(&app, "/api/scenes/s1/visual-memory").await;
    assert_eq!(stored["shot_count"], json!(1));
    assert_eq!(stored["pacing_level"], json!("slow"));
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = test_app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ready"));
}
