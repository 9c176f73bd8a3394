//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts_handler).post(create_workout_handler),
        )
        .route(
            "/api/workouts/:id",
            get(get_workout_handler)
                .patch(update_workout_handler)
                .delete(delete_workout_handler),
        )
        .route("/api/goals", get(list_goals_handler).post(create_goal_handler))
        .route(
            "/api/goals/:id",
            patch(update_goal_handler).delete(delete_goal_handler),
        )
        .route(
            "/api/timer-settings",
            get(get_timer_settings_handler).post(update_timer_settings_handler),
        )
        .route("/api/timer", get(timer_status_handler))
        .route("/api/timer/start", post(timer_start_handler))
        .route("/api/timer/pause", post(timer_pause_handler))
        .route("/api/timer/reset", post(timer_reset_handler))
        .route("/api/stats", get(stats_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
