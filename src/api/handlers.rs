//! HTTP endpoint handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{
    models::{
        Goal, InsertGoal, InsertTimerSettings, InsertWorkout, TimerSettings, UpdateGoal,
        UpdateWorkout, Workout,
    },
    stats::{progress_stats, ProgressStats},
    state::{AppState, UpdateSettingsError, DEFAULT_USER_ID},
};
use super::responses::{ErrorResponse, HealthResponse, StatusResponse, TimerStatusResponse};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: String) -> ApiError {
    error!("{}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

fn bad_request(message: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn not_found(what: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(format!("{} not found", what))),
    )
}

fn forbidden(message: &str) -> ApiError {
    (StatusCode::FORBIDDEN, Json(ErrorResponse::new(message)))
}

// Workout handlers

/// Handle GET /api/workouts - List the user's workouts, newest first
pub async fn list_workouts_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let workouts = state
        .with_store(|store| store.workouts_for_user(DEFAULT_USER_ID))
        .map_err(internal_error)?;
    Ok(Json(workouts))
}

/// Handle GET /api/workouts/:id
pub async fn get_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<Json<Workout>, ApiError> {
    let workout = state
        .with_store(|store| store.get_workout(id).cloned())
        .map_err(internal_error)?;
    workout.map(Json).ok_or_else(|| not_found("Workout"))
}

/// Handle POST /api/workouts - Log a workout
pub async fn create_workout_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<InsertWorkout>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    if let Err(e) = payload.validate() {
        return Err(bad_request(format!("Invalid workout data: {}", e)));
    }
    let workout = state
        .with_store(|store| store.create_workout(DEFAULT_USER_ID, payload))
        .map_err(internal_error)?;
    info!(
        "Workout logged: {} ({} min)",
        workout.exercise_name, workout.duration
    );
    state.record_action("workout-create");
    Ok((StatusCode::CREATED, Json(workout)))
}

/// Handle PATCH /api/workouts/:id - Partially update a workout
pub async fn update_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(payload): Json<UpdateWorkout>,
) -> Result<Json<Workout>, ApiError> {
    if let Err(e) = payload.validate() {
        return Err(bad_request(format!("Invalid workout data: {}", e)));
    }
    let owner = state
        .with_store(|store| store.get_workout(id).map(|workout| workout.user_id))
        .map_err(internal_error)?;
    match owner {
        None => return Err(not_found("Workout")),
        Some(user_id) if user_id != DEFAULT_USER_ID => {
            return Err(forbidden("Not authorized to update this workout"))
        }
        Some(_) => {}
    }
    let updated = state
        .with_store(|store| store.update_workout(id, payload))
        .map_err(internal_error)?;
    updated.map(Json).ok_or_else(|| not_found("Workout"))
}

/// Handle DELETE /api/workouts/:id
pub async fn delete_workout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    let owner = state
        .with_store(|store| store.get_workout(id).map(|workout| workout.user_id))
        .map_err(internal_error)?;
    match owner {
        None => return Err(not_found("Workout")),
        Some(user_id) if user_id != DEFAULT_USER_ID => {
            return Err(forbidden("Not authorized to delete this workout"))
        }
        Some(_) => {}
    }
    state
        .with_store(|store| store.delete_workout(id))
        .map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// Goal handlers

/// Handle GET /api/goals - List the user's goals
pub async fn list_goals_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Goal>>, ApiError> {
    let goals = state
        .with_store(|store| store.goals_for_user(DEFAULT_USER_ID))
        .map_err(internal_error)?;
    Ok(Json(goals))
}

/// Handle POST /api/goals - Create a goal
pub async fn create_goal_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<InsertGoal>,
) -> Result<(StatusCode, Json<Goal>), ApiError> {
    if let Err(e) = payload.validate() {
        return Err(bad_request(format!("Invalid goal data: {}", e)));
    }
    let goal = state
        .with_store(|store| store.create_goal(DEFAULT_USER_ID, payload))
        .map_err(internal_error)?;
    info!("Goal created: {} (target {})", goal.title, goal.target);
    state.record_action("goal-create");
    Ok((StatusCode::CREATED, Json(goal)))
}

/// Handle PATCH /api/goals/:id - Update goal progress or fields
pub async fn update_goal_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Json(payload): Json<UpdateGoal>,
) -> Result<Json<Goal>, ApiError> {
    let owner = state
        .with_store(|store| store.get_goal(id).map(|goal| goal.user_id))
        .map_err(internal_error)?;
    match owner {
        None => return Err(not_found("Goal")),
        Some(user_id) if user_id != DEFAULT_USER_ID => {
            return Err(forbidden("Not authorized to update this goal"))
        }
        Some(_) => {}
    }
    let updated = state
        .with_store(|store| store.update_goal(id, payload))
        .map_err(internal_error)?;
    updated.map(Json).ok_or_else(|| not_found("Goal"))
}

/// Handle DELETE /api/goals/:id
pub async fn delete_goal_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
) -> Result<StatusCode, ApiError> {
    let owner = state
        .with_store(|store| store.get_goal(id).map(|goal| goal.user_id))
        .map_err(internal_error)?;
    match owner {
        None => return Err(not_found("Goal")),
        Some(user_id) if user_id != DEFAULT_USER_ID => {
            return Err(forbidden("Not authorized to delete this goal"))
        }
        Some(_) => {}
    }
    state
        .with_store(|store| store.delete_goal(id))
        .map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// Timer handlers

/// Handle GET /api/timer-settings - Stored settings, or defaults
pub async fn get_timer_settings_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerSettings>, ApiError> {
    let settings = state
        .with_store(|store| store.timer_settings_for_user(DEFAULT_USER_ID).cloned())
        .map_err(internal_error)?;
    Ok(Json(
        settings.unwrap_or_else(|| TimerSettings::defaults_for(DEFAULT_USER_ID)),
    ))
}

/// Handle POST /api/timer-settings - Save settings and reconfigure the engine
pub async fn update_timer_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<InsertTimerSettings>,
) -> Result<Json<TimerSettings>, ApiError> {
    match state.update_timer_settings(payload) {
        Ok(settings) => Ok(Json(settings)),
        Err(UpdateSettingsError::InvalidConfig(e)) => {
            Err(bad_request(format!("Invalid settings data: {}", e)))
        }
        Err(UpdateSettingsError::Internal(e)) => Err(internal_error(e)),
    }
}

/// Handle GET /api/timer - Current timer snapshot
pub async fn timer_status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerStatusResponse>, ApiError> {
    state
        .get_timer_snapshot()
        .map(|snapshot| Json(snapshot.into()))
        .map_err(internal_error)
}

/// Handle POST /api/timer/start
pub async fn timer_start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerStatusResponse>, ApiError> {
    state
        .start_timer()
        .map(|snapshot| Json(snapshot.into()))
        .map_err(internal_error)
}

/// Handle POST /api/timer/pause
pub async fn timer_pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerStatusResponse>, ApiError> {
    state
        .pause_timer()
        .map(|snapshot| Json(snapshot.into()))
        .map_err(internal_error)
}

/// Handle POST /api/timer/reset
pub async fn timer_reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimerStatusResponse>, ApiError> {
    state
        .reset_timer()
        .map(|snapshot| Json(snapshot.into()))
        .map_err(internal_error)
}

// Progress and server plumbing

/// Handle GET /api/stats - Progress summary over the workout history
pub async fn stats_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProgressStats>, ApiError> {
    let workouts = state
        .with_store(|store| store.workouts_for_user(DEFAULT_USER_ID))
        .map_err(internal_error)?;
    Ok(Json(progress_stats(&workouts)))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let snapshot = state.get_timer_snapshot().map_err(internal_error)?;
    let (workout_count, goal_count) = state
        .with_store(|store| {
            (
                store.workouts_for_user(DEFAULT_USER_ID).len(),
                store.goals_for_user(DEFAULT_USER_ID).len(),
            )
        })
        .map_err(internal_error)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: snapshot.into(),
        workout_count,
        goal_count,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
