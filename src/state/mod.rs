//! State management module
//!
//! This module contains the in-memory store and the shared application
//! state that ties storage and the timer engine together.

pub mod app_state;
pub mod store;

// Re-export main types
pub use app_state::{AppState, UpdateSettingsError, DEFAULT_USER_ID};
pub use store::MemStore;
