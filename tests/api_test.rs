//! HTTP API integration tests
//!
//! Drives the axum router directly with oneshot requests; no listening
//! socket and no background tick task are involved.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use fittrack::{api::create_router, state::AppState, timer::TimerConfig};

fn test_app() -> Router {
    let state = AppState::new(5000, "127.0.0.1".to_string(), TimerConfig::default()).unwrap();
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Failed to execute request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Body is not valid JSON")
    };
    (status, value)
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn workout_crud_flow() {
    let app = test_app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/workouts",
        Some(json!({
            "exerciseType": "cardio",
            "exerciseName": "Running",
            "duration": 30,
            "intensity": 7,
            "notes": "easy pace"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["exerciseName"], "Running");
    assert_eq!(created["userId"], 1);
    let id = created["id"].as_u64().unwrap();

    let (status, listed) = send(&app, Method::GET, "/api/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/workouts/{}", id),
        Some(json!({ "duration": 45 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["duration"], 45);
    assert_eq!(updated["exerciseName"], "Running");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/workouts/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/workouts/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Workout not found");
}

#[tokio::test]
async fn invalid_workout_is_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/workouts",
        Some(json!({
            "exerciseType": "cardio",
            "exerciseName": "Running",
            "duration": 0,
            "intensity": 5
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid workout data"));

    let (_, listed) = send(&app, Method::GET, "/api/workouts", None).await;
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn goal_completes_when_progress_reaches_target() {
    let app = test_app();

    let (status, goal) = send(
        &app,
        Method::POST,
        "/api/goals",
        Some(json!({
            "title": "Monthly workouts",
            "target": 2,
            "type": "workout_count"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["completed"], false);
    assert_eq!(goal["current"], 0);
    let id = goal["id"].as_u64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/goals/{}", id),
        Some(json!({ "current": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/goals/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn timer_settings_round_trip_and_engine_reconfigure() {
    let app = test_app();

    // Defaults are served before anything is saved
    let (status, defaults) = send(&app, Method::GET, "/api/timer-settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaults["intervalDuration"], 120);
    assert_eq!(defaults["intervalCount"], 4);
    assert_eq!(defaults["countDirection"], "down");

    let (status, saved) = send(
        &app,
        Method::POST,
        "/api/timer-settings",
        Some(json!({
            "intervalDuration": 90,
            "intervalCount": 3,
            "soundEnabled": false,
            "countDirection": "up"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["intervalDuration"], 90);

    let (_, stored) = send(&app, Method::GET, "/api/timer-settings", None).await;
    assert_eq!(stored["intervalCount"], 3);
    assert_eq!(stored["countDirection"], "up");

    // The stopped engine picked up the new configuration immediately
    let (_, timer) = send(&app, Method::GET, "/api/timer", None).await;
    assert_eq!(timer["intervalDuration"], 90);
    assert_eq!(timer["countDirection"], "up");
    assert_eq!(timer["seconds"], 0);
    assert_eq!(timer["display"], "00:00");
}

#[tokio::test]
async fn invalid_timer_settings_are_rejected() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/timer-settings",
        Some(json!({
            "intervalDuration": 0,
            "intervalCount": 4,
            "soundEnabled": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid settings data"));

    // Previous configuration stays in effect
    let (_, timer) = send(&app, Method::GET, "/api/timer", None).await;
    assert_eq!(timer["intervalDuration"], 120);
}

#[tokio::test]
async fn timer_commands_drive_the_engine() {
    let app = test_app();

    let (status, timer) = send(&app, Method::GET, "/api/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(timer["running"], false);
    assert_eq!(timer["seconds"], 120);
    assert_eq!(timer["display"], "02:00");
    assert_eq!(timer["currentInterval"], 1);

    let (status, started) = send(&app, Method::POST, "/api/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["running"], true);

    let (_, paused) = send(&app, Method::POST, "/api/timer/pause", None).await;
    assert_eq!(paused["running"], false);
    assert_eq!(paused["currentInterval"], 1);

    let (_, reset) = send(&app, Method::POST, "/api/timer/reset", None).await;
    assert_eq!(reset["running"], false);
    assert_eq!(reset["seconds"], 120);
    assert_eq!(reset["currentInterval"], 1);
}

#[tokio::test]
async fn stats_summarize_the_workout_history() {
    let app = test_app();

    for (duration, intensity) in [(30, 5), (20, 10)] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/workouts",
            Some(json!({
                "exerciseType": "strength",
                "exerciseName": "Squats",
                "duration": duration,
                "intensity": intensity
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, stats) = send(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalWorkouts"], 2);
    assert_eq!(stats["totalDurationMinutes"], 50);
    assert_eq!(stats["caloriesBurned"], 350);
    let weekly = stats["weekly"].as_array().unwrap();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0]["workoutCount"], 2);
}

#[tokio::test]
async fn status_reports_counts_and_timer() {
    let app = test_app();

    send(
        &app,
        Method::POST,
        "/api/goals",
        Some(json!({ "title": "Stretch daily", "target": 7, "type": "weekly_frequency" })),
    )
    .await;

    let (status, body) = send(&app, Method::GET, "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["workoutCount"], 0);
    assert_eq!(body["goalCount"], 1);
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["port"], 5000);
    assert_eq!(body["lastAction"], "goal-create");
    assert!(body["uptime"].is_string());
}
