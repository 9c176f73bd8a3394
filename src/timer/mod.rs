//! Interval timer module
//!
//! This module contains the interval timer engine that drives workout
//! countdown/count-up sequencing.

pub mod engine;

// Re-export main types
pub use engine::{CountDirection, TimerConfig, TimerConfigError, TimerEngine, TimerEvent, TimerSnapshot};
