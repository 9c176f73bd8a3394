//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    models::{InsertTimerSettings, InsertUser, TimerSettings},
    timer::{TimerConfig, TimerConfigError, TimerEngine, TimerEvent, TimerSnapshot},
};

use super::MemStore;

/// Placeholder user owning all records until real authentication exists.
pub const DEFAULT_USER_ID: u32 = 1;

/// Error from applying new timer settings.
#[derive(Debug, Error)]
pub enum UpdateSettingsError {
    #[error(transparent)]
    InvalidConfig(#[from] TimerConfigError),
    #[error("{0}")]
    Internal(String),
}

/// Main application state shared between HTTP handlers and the tick driver.
///
/// Engine commands and tick processing both go through the same mutex, so
/// no two timer mutations ever interleave.
#[derive(Debug)]
pub struct AppState {
    /// In-memory record storage
    pub store: Arc<Mutex<MemStore>>,
    /// The interval timer engine
    pub timer: Arc<Mutex<TimerEngine>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Gates the tick driver: true while the engine should be ticking
    run_state_tx: watch::Sender<bool>,
    /// Snapshot published after every state mutation
    timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Interval/workout completion notifications
    timer_event_tx: broadcast::Sender<TimerEvent>,
    /// Keep the receivers alive to prevent channel closure
    _run_state_rx: watch::Receiver<bool>,
    _timer_update_rx: watch::Receiver<TimerSnapshot>,
    _timer_event_rx: broadcast::Receiver<TimerEvent>,
}

impl AppState {
    /// Create the application state with a seeded demo user and a stopped
    /// engine built from the initial configuration.
    pub fn new(port: u16, host: String, config: TimerConfig) -> Result<Self, TimerConfigError> {
        let engine = TimerEngine::new(config)?;
        let snapshot = engine.snapshot();

        let mut store = MemStore::new();
        if store.get_user_by_username("demo").is_none() {
            store.create_user(InsertUser {
                username: "demo".to_string(),
                password: "password".to_string(),
            });
        }

        let (run_state_tx, run_state_rx) = watch::channel(false);
        let (timer_update_tx, timer_update_rx) = watch::channel(snapshot);
        let (timer_event_tx, timer_event_rx) = broadcast::channel(16);

        Ok(Self {
            store: Arc::new(Mutex::new(store)),
            timer: Arc::new(Mutex::new(engine)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            run_state_tx,
            timer_update_tx,
            timer_event_tx,
            _run_state_rx: run_state_rx,
            _timer_update_rx: timer_update_rx,
            _timer_event_rx: timer_event_rx,
        })
    }

    /// Run a closure against the locked store.
    pub fn with_store<F, T>(&self, f: F) -> Result<T, String>
    where
        F: FnOnce(&mut MemStore) -> T,
    {
        let mut store = self
            .store
            .lock()
            .map_err(|e| format!("Failed to lock store: {}", e))?;
        Ok(f(&mut store))
    }

    /// Start the timer. A no-op when already running, so the tick driver is
    /// never armed twice.
    pub fn start_timer(&self) -> Result<TimerSnapshot, String> {
        let mut engine = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        let started = engine.start();
        let snapshot = engine.snapshot();
        drop(engine);

        if started {
            info!(
                "Timer started: interval {}/{}, {}s",
                snapshot.current_interval, snapshot.interval_count, snapshot.seconds
            );
            self.record_action("timer-start");
            self.publish_snapshot(snapshot);
            self.signal_run_state(true);
        }
        Ok(snapshot)
    }

    /// Pause the timer, preserving interval progress. A no-op when stopped.
    pub fn pause_timer(&self) -> Result<TimerSnapshot, String> {
        let mut engine = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        let paused = engine.pause();
        let snapshot = engine.snapshot();
        drop(engine);

        if paused {
            info!(
                "Timer paused at {}s in interval {}",
                snapshot.seconds, snapshot.current_interval
            );
            self.record_action("timer-pause");
            self.publish_snapshot(snapshot);
            self.signal_run_state(false);
        }
        Ok(snapshot)
    }

    /// Stop the timer and reinitialize it to the start of interval 1.
    pub fn reset_timer(&self) -> Result<TimerSnapshot, String> {
        let mut engine = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        engine.reset();
        let snapshot = engine.snapshot();
        drop(engine);

        info!("Timer reset");
        self.record_action("timer-reset");
        self.publish_snapshot(snapshot);
        self.signal_run_state(false);
        Ok(snapshot)
    }

    /// Persist new timer settings and reconfigure the live engine.
    ///
    /// Invalid settings are rejected before any state changes; the previous
    /// configuration stays in effect.
    pub fn update_timer_settings(
        &self,
        insert: InsertTimerSettings,
    ) -> Result<TimerSettings, UpdateSettingsError> {
        let config = insert.to_config();

        let mut engine = self.timer.lock().map_err(|e| {
            UpdateSettingsError::Internal(format!("Failed to lock timer engine: {}", e))
        })?;
        engine.reconfigure(config)?;
        let snapshot = engine.snapshot();
        drop(engine);
        self.publish_snapshot(snapshot);

        let settings = self
            .with_store(|store| store.upsert_timer_settings(DEFAULT_USER_ID, insert))
            .map_err(UpdateSettingsError::Internal)?;
        info!(
            "Timer settings updated: {}s x {} intervals",
            settings.interval_duration, settings.interval_count
        );
        self.record_action("timer-settings");
        Ok(settings)
    }

    /// Apply one clock tick to the engine. Returns whether the engine is
    /// still running afterwards.
    ///
    /// The running check under the engine lock is the liveness guard: a tick
    /// that was already scheduled when the timer stopped is discarded here
    /// instead of mutating state.
    pub fn process_tick(&self) -> Result<bool, String> {
        let mut engine = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;
        if !engine.is_running() {
            return Ok(false);
        }
        let event = engine.tick();
        let snapshot = engine.snapshot();
        drop(engine);

        self.publish_snapshot(snapshot);
        if let Some(event) = event {
            match event {
                TimerEvent::IntervalComplete(index) => {
                    info!(
                        "Interval {} complete, starting interval {}",
                        index, snapshot.current_interval
                    );
                }
                TimerEvent::WorkoutComplete => {
                    info!(
                        "Workout complete after {} intervals",
                        snapshot.interval_count
                    );
                    self.signal_run_state(false);
                }
            }
            if let Err(e) = self.timer_event_tx.send(event) {
                debug!("No timer event listeners: {}", e);
            }
        }
        Ok(snapshot.running)
    }

    /// Get the current timer snapshot
    pub fn get_timer_snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer
            .lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Subscribe to the run-state gate (used by the tick driver)
    pub fn subscribe_run_state(&self) -> watch::Receiver<bool> {
        self.run_state_tx.subscribe()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe_timer_updates(&self) -> watch::Receiver<TimerSnapshot> {
        self.timer_update_tx.subscribe()
    }

    /// Subscribe to interval/workout completion events
    pub fn subscribe_timer_events(&self) -> broadcast::Receiver<TimerEvent> {
        self.timer_event_tx.subscribe()
    }

    fn publish_snapshot(&self, snapshot: TimerSnapshot) {
        if let Err(e) = self.timer_update_tx.send(snapshot) {
            warn!("Failed to send timer update: {}", e);
        }
    }

    fn signal_run_state(&self, running: bool) {
        if let Err(e) = self.run_state_tx.send(running) {
            warn!("Failed to signal run state: {}", e);
        }
    }

    /// Update last action tracking
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::CountDirection;

    fn state() -> AppState {
        AppState::new(5000, "127.0.0.1".to_string(), TimerConfig::default()).unwrap()
    }

    #[test]
    fn demo_user_is_seeded() {
        let state = state();
        let found = state
            .with_store(|store| store.get_user_by_username("demo").cloned())
            .unwrap();
        assert_eq!(found.unwrap().id, DEFAULT_USER_ID);
    }

    #[test]
    fn start_flips_run_state_once() {
        let state = state();
        let run_rx = state.subscribe_run_state();
        assert!(!*run_rx.borrow());

        let snapshot = state.start_timer().unwrap();
        assert!(snapshot.running);
        assert!(*run_rx.borrow());

        // Second start is a no-op
        let snapshot = state.start_timer().unwrap();
        assert!(snapshot.running);
    }

    #[test]
    fn ticks_are_discarded_once_stopped() {
        let state = state();
        state.start_timer().unwrap();
        assert!(state.process_tick().unwrap());
        state.pause_timer().unwrap();

        // A tick already in flight when the timer stopped must not mutate
        // state
        let before = state.get_timer_snapshot().unwrap();
        assert!(!state.process_tick().unwrap());
        assert_eq!(state.get_timer_snapshot().unwrap(), before);
    }

    #[test]
    fn workout_completion_emits_events_and_clears_run_state() {
        let state = AppState::new(
            5000,
            "127.0.0.1".to_string(),
            TimerConfig {
                interval_duration: 1,
                interval_count: 2,
                count_direction: CountDirection::Down,
                sound_enabled: false,
            },
        )
        .unwrap();
        let mut events = state.subscribe_timer_events();
        let run_rx = state.subscribe_run_state();

        state.start_timer().unwrap();
        assert!(state.process_tick().unwrap());
        assert!(!state.process_tick().unwrap());

        assert_eq!(events.try_recv().unwrap(), TimerEvent::IntervalComplete(1));
        assert_eq!(events.try_recv().unwrap(), TimerEvent::WorkoutComplete);
        assert!(!*run_rx.borrow());
    }

    #[test]
    fn invalid_settings_leave_engine_untouched() {
        let state = state();
        let err = state
            .update_timer_settings(InsertTimerSettings {
                interval_duration: 0,
                interval_count: 4,
                sound_enabled: true,
                count_direction: CountDirection::Down,
            })
            .unwrap_err();
        assert!(matches!(err, UpdateSettingsError::InvalidConfig(_)));

        let snapshot = state.get_timer_snapshot().unwrap();
        assert_eq!(snapshot.interval_duration, 120);

        // Nothing was persisted either
        let stored = state
            .with_store(|store| store.timer_settings_for_user(DEFAULT_USER_ID).cloned())
            .unwrap();
        assert!(stored.is_none());
    }
}
