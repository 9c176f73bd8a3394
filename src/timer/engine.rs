//! Interval timer engine
//!
//! A synchronous state machine that sequences a workout through a fixed
//! number of fixed-length intervals, counting either down or up. The engine
//! owns no clock: the tick driver task calls [`TimerEngine::tick`] once per
//! second while the engine is running, and commands arrive through the same
//! mutex, so no two state mutations ever interleave.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction the in-interval counter moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountDirection {
    /// Count from 0 up to the interval duration.
    Up,
    /// Count from the interval duration down to 0.
    Down,
}

impl Default for CountDirection {
    fn default() -> Self {
        Self::Down
    }
}

/// Error returned when a configuration would produce zero-length or
/// infinite intervals.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerConfigError {
    #[error("interval duration must be at least 1 second, got {0}")]
    IntervalDuration(u32),
    #[error("interval count must be at least 1, got {0}")]
    IntervalCount(u32),
}

/// Timer configuration, immutable per run and replaceable between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    /// Seconds per interval.
    pub interval_duration: u32,
    /// Total number of intervals in the workout.
    pub interval_count: u32,
    pub count_direction: CountDirection,
    /// Advisory flag for the presentation layer; the engine never reads it.
    pub sound_enabled: bool,
}

impl TimerConfig {
    /// Reject configurations with a non-positive duration or count.
    pub fn validate(&self) -> Result<(), TimerConfigError> {
        if self.interval_duration < 1 {
            return Err(TimerConfigError::IntervalDuration(self.interval_duration));
        }
        if self.interval_count < 1 {
            return Err(TimerConfigError::IntervalCount(self.interval_count));
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            interval_duration: 120,
            interval_count: 4,
            count_direction: CountDirection::Down,
            sound_enabled: true,
        }
    }
}

/// Notification emitted by [`TimerEngine::tick`] when a boundary is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// An interval finished and the engine advanced to the next one.
    /// Carries the 1-based index of the interval that just completed.
    IntervalComplete(u32),
    /// The final interval finished; the engine has stopped itself.
    WorkoutComplete,
}

/// Read-only view of the engine for rendering and status endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    /// Seconds remaining in the current interval when counting down,
    /// seconds elapsed when counting up.
    pub seconds: u32,
    /// 1-based index of the interval in progress.
    pub current_interval: u32,
    pub interval_count: u32,
    pub interval_duration: u32,
    pub running: bool,
    pub count_direction: CountDirection,
    pub sound_enabled: bool,
}

/// Interval timer state machine.
///
/// States are Stopped and Running; `pause` is simply Stopped with progress
/// preserved. The counter stays within `[0, interval_duration]` and
/// `current_interval` never exceeds `interval_count`.
#[derive(Debug)]
pub struct TimerEngine {
    config: TimerConfig,
    /// Direction-dependent counter: remaining seconds (Down) or elapsed
    /// seconds (Up).
    seconds: u32,
    current_interval: u32,
    running: bool,
}

impl TimerEngine {
    /// Create a stopped engine positioned at the start of interval 1.
    pub fn new(config: TimerConfig) -> Result<Self, TimerConfigError> {
        config.validate()?;
        let mut engine = Self {
            config,
            seconds: 0,
            current_interval: 1,
            running: false,
        };
        engine.seconds = engine.initial_seconds();
        Ok(engine)
    }

    /// Start ticking. Returns `true` if the engine transitioned from
    /// Stopped to Running, `false` if it was already running (no-op, so the
    /// caller never arms a second ticker).
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop ticking without losing progress. Returns `true` if the engine
    /// transitioned from Running to Stopped.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    /// Stop and reinitialize: interval 1, counter at the direction-appropriate
    /// bound. Safe to call at any time.
    pub fn reset(&mut self) {
        self.running = false;
        self.current_interval = 1;
        self.seconds = self.initial_seconds();
    }

    /// Replace the active configuration.
    ///
    /// While running the new duration and count take effect at the next
    /// interval boundary reached naturally; the in-flight counter is left as
    /// raw seconds rather than rescaled. While stopped the counter resets to
    /// the new direction-appropriate bound and the current interval is
    /// clamped to the new count. A rejected configuration leaves the
    /// previous one fully in effect.
    pub fn reconfigure(&mut self, config: TimerConfig) -> Result<(), TimerConfigError> {
        config.validate()?;
        self.config = config;
        if !self.running {
            self.current_interval = self.current_interval.min(self.config.interval_count);
            self.seconds = self.initial_seconds();
        }
        Ok(())
    }

    /// Advance the clock by one second.
    ///
    /// Exactly one of three things happens: the counter moves one second,
    /// an interval boundary advances to the next interval, or the final
    /// boundary completes the workout and stops the engine. A tick delivered
    /// after the engine stopped is discarded, which makes cancellation exact
    /// even if a scheduled tick is already in flight.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        let at_boundary = match self.config.count_direction {
            CountDirection::Down => self.seconds <= 1,
            CountDirection::Up => self.seconds + 1 >= self.config.interval_duration,
        };
        if at_boundary {
            Some(self.complete_interval())
        } else {
            match self.config.count_direction {
                CountDirection::Down => self.seconds -= 1,
                CountDirection::Up => self.seconds += 1,
            }
            None
        }
    }

    fn complete_interval(&mut self) -> TimerEvent {
        if self.current_interval < self.config.interval_count {
            let completed = self.current_interval;
            self.current_interval += 1;
            self.seconds = self.initial_seconds();
            TimerEvent::IntervalComplete(completed)
        } else {
            self.running = false;
            // The counter lands on the terminal bound: 0 when counting down,
            // the full duration when counting up.
            self.seconds = match self.config.count_direction {
                CountDirection::Down => 0,
                CountDirection::Up => self.config.interval_duration,
            };
            TimerEvent::WorkoutComplete
        }
    }

    fn initial_seconds(&self) -> u32 {
        match self.config.count_direction {
            CountDirection::Down => self.config.interval_duration,
            CountDirection::Up => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            seconds: self.seconds,
            current_interval: self.current_interval,
            interval_count: self.config.interval_count,
            interval_duration: self.config.interval_duration,
            running: self.running,
            count_direction: self.config.count_direction,
            sound_enabled: self.config.sound_enabled,
        }
    }
}
