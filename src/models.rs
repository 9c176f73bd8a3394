//! Domain records and their insert/update forms
//!
//! Wire format is camelCase JSON, matching what the web client already
//! sends and expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::timer::{CountDirection, TimerConfig};

/// Validation error for incoming workout and goal payloads.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("exercise type must not be empty")]
    EmptyExerciseType,
    #[error("exercise name must not be empty")]
    EmptyExerciseName,
    #[error("duration must be at least 1 minute, got {0}")]
    Duration(u32),
    #[error("intensity must be between 1 and 10, got {0}")]
    Intensity(u32),
    #[error("goal title must not be empty")]
    EmptyTitle,
    #[error("goal target must be at least 1, got {0}")]
    Target(u32),
}

/// Registered user. Authentication is out of scope; a single demo user is
/// seeded at startup and owns all records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertUser {
    pub username: String,
    pub password: String,
}

/// A logged workout session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: u32,
    pub user_id: u32,
    pub exercise_type: String,
    pub exercise_name: String,
    /// Duration in minutes.
    pub duration: u32,
    /// Perceived intensity on a 1-10 scale.
    pub intensity: u32,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertWorkout {
    pub exercise_type: String,
    pub exercise_name: String,
    pub duration: u32,
    pub intensity: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl InsertWorkout {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.exercise_type.trim().is_empty() {
            return Err(ValidationError::EmptyExerciseType);
        }
        if self.exercise_name.trim().is_empty() {
            return Err(ValidationError::EmptyExerciseName);
        }
        if self.duration < 1 {
            return Err(ValidationError::Duration(self.duration));
        }
        if !(1..=10).contains(&self.intensity) {
            return Err(ValidationError::Intensity(self.intensity));
        }
        Ok(())
    }
}

/// Partial workout update for PATCH requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkout {
    pub exercise_type: Option<String>,
    pub exercise_name: Option<String>,
    pub duration: Option<u32>,
    pub intensity: Option<u32>,
    pub notes: Option<String>,
}

impl UpdateWorkout {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(exercise_type) = &self.exercise_type {
            if exercise_type.trim().is_empty() {
                return Err(ValidationError::EmptyExerciseType);
            }
        }
        if let Some(exercise_name) = &self.exercise_name {
            if exercise_name.trim().is_empty() {
                return Err(ValidationError::EmptyExerciseName);
            }
        }
        if let Some(duration) = self.duration {
            if duration < 1 {
                return Err(ValidationError::Duration(duration));
            }
        }
        if let Some(intensity) = self.intensity {
            if !(1..=10).contains(&intensity) {
                return Err(ValidationError::Intensity(intensity));
            }
        }
        Ok(())
    }
}

/// A progress goal, e.g. "work out 12 times this month".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: u32,
    pub user_id: u32,
    pub title: String,
    pub target: u32,
    pub current: u32,
    /// Goal category such as "workout_count" or "weekly_frequency".
    #[serde(rename = "type")]
    pub goal_type: String,
    pub completed: bool,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertGoal {
    pub title: String,
    pub target: u32,
    #[serde(rename = "type")]
    pub goal_type: String,
}

impl InsertGoal {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.target < 1 {
            return Err(ValidationError::Target(self.target));
        }
        Ok(())
    }
}

/// Partial goal update for PATCH requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoal {
    pub title: Option<String>,
    pub target: Option<u32>,
    pub current: Option<u32>,
    #[serde(rename = "type")]
    pub goal_type: Option<String>,
}

/// Per-user interval timer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub id: u32,
    pub user_id: u32,
    /// Seconds per interval.
    pub interval_duration: u32,
    pub interval_count: u32,
    pub sound_enabled: bool,
    pub count_direction: CountDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertTimerSettings {
    pub interval_duration: u32,
    pub interval_count: u32,
    pub sound_enabled: bool,
    #[serde(default)]
    pub count_direction: CountDirection,
}

impl InsertTimerSettings {
    /// View the settings as an engine configuration. Validation happens in
    /// the engine, which is the authority on what a legal configuration is.
    pub fn to_config(&self) -> TimerConfig {
        TimerConfig {
            interval_duration: self.interval_duration,
            interval_count: self.interval_count,
            count_direction: self.count_direction,
            sound_enabled: self.sound_enabled,
        }
    }
}

impl TimerSettings {
    /// Default settings served before the user has saved any.
    pub fn defaults_for(user_id: u32) -> Self {
        let config = TimerConfig::default();
        Self {
            id: 0,
            user_id,
            interval_duration: config.interval_duration,
            interval_count: config.interval_count,
            sound_enabled: config.sound_enabled,
            count_direction: config.count_direction,
        }
    }
}
