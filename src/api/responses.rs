//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{stats::format_time, timer::CountDirection, timer::TimerSnapshot};

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Timer snapshot as served to clients, with a pre-rendered mm:ss display
/// string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStatusResponse {
    pub seconds: u32,
    pub display: String,
    pub current_interval: u32,
    pub interval_count: u32,
    pub interval_duration: u32,
    pub running: bool,
    pub count_direction: CountDirection,
    pub sound_enabled: bool,
}

impl From<TimerSnapshot> for TimerStatusResponse {
    fn from(snapshot: TimerSnapshot) -> Self {
        Self {
            seconds: snapshot.seconds,
            display: format_time(snapshot.seconds),
            current_interval: snapshot.current_interval,
            interval_count: snapshot.interval_count,
            interval_duration: snapshot.interval_duration,
            running: snapshot.running,
            count_direction: snapshot.count_direction,
            sound_enabled: snapshot.sound_enabled,
        }
    }
}

/// Server status response with timer and record counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub timer: TimerStatusResponse,
    pub workout_count: usize,
    pub goal_count: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: "1.0.0".to_string(),
        }
    }
}
