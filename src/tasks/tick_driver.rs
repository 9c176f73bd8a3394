//! Interval timer tick driver background task

use std::{sync::Arc, time::Duration};
use tokio::time::interval;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Background task that delivers one tick per second to the timer engine
/// while it is running.
///
/// The run-state watch channel gates the loop: the 1-second interval exists
/// only while the engine is running, so there is never more than one live
/// ticker. Pause and reset flip the gate and end the inner loop; a tick
/// already in flight when the timer stopped is discarded by the running
/// check inside tick processing.
pub async fn timer_tick_task(state: Arc<AppState>) {
    info!("Starting timer tick task");

    let mut run_rx = state.subscribe_run_state();

    loop {
        // Wait until the engine enters the running state
        if !*run_rx.borrow_and_update() {
            if run_rx.changed().await.is_err() {
                debug!("Run state channel closed, stopping tick task");
                return;
            }
            continue;
        }

        debug!("Engine running, arming 1s ticker");
        let mut ticker = interval(Duration::from_secs(1));
        // The first tick of a tokio interval completes immediately; consume
        // it so the first countdown second lands a full second after start
        ticker.tick().await;

        loop {
            tokio::select! {
                // Clock tick - advance the engine
                _ = ticker.tick() => {
                    match state.process_tick() {
                        Ok(still_running) => {
                            if !still_running {
                                debug!("Engine stopped, disarming ticker");
                                break;
                            }
                        }
                        Err(e) => {
                            error!("Failed to process tick: {}", e);
                        }
                    }
                }

                // Run state change - check if the timer was stopped
                changed = run_rx.changed() => {
                    match changed {
                        Ok(()) => {
                            if !*run_rx.borrow_and_update() {
                                debug!("Timer stopped, disarming ticker");
                                break;
                            }
                        }
                        Err(_) => {
                            debug!("Run state channel closed, stopping tick task");
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{CountDirection, TimerConfig, TimerEvent};

    fn test_state(duration: u32, count: u32) -> Arc<AppState> {
        Arc::new(
            AppState::new(
                5000,
                "127.0.0.1".to_string(),
                TimerConfig {
                    interval_duration: duration,
                    interval_count: count,
                    count_direction: CountDirection::Down,
                    sound_enabled: false,
                },
            )
            .unwrap(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn drives_a_full_workout_to_completion() {
        let state = test_state(2, 2);
        let mut events = state.subscribe_timer_events();
        tokio::spawn(timer_tick_task(Arc::clone(&state)));

        state.start_timer().unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            TimerEvent::IntervalComplete(1)
        );
        assert_eq!(events.recv().await.unwrap(), TimerEvent::WorkoutComplete);

        let snapshot = state.get_timer_snapshot().unwrap();
        assert!(!snapshot.running);
        assert_eq!(snapshot.seconds, 0);
        assert_eq!(snapshot.current_interval, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_disarms_the_ticker() {
        let state = test_state(30, 1);
        tokio::spawn(timer_tick_task(Arc::clone(&state)));

        state.start_timer().unwrap();
        let mut updates = state.subscribe_timer_updates();
        updates.changed().await.unwrap();
        assert!(updates.borrow_and_update().seconds < 30);

        state.pause_timer().unwrap();
        let paused = state.get_timer_snapshot().unwrap();

        // With the ticker disarmed, time passing must not move the counter
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.get_timer_snapshot().unwrap(), paused);
    }
}
