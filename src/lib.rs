//! FitTrack - A state-managed HTTP server for personal fitness tracking
//!
//! This library provides an interval timer engine for workout sessions,
//! together with workout logging, goal tracking and progress statistics
//! served over a minimal REST API backed by in-memory storage.

pub mod api;
pub mod config;
pub mod models;
pub mod state;
pub mod stats;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::AppState;
pub use timer::{TimerConfig, TimerEngine};
pub use utils::signals::shutdown_signal;
