//! FitTrack - A state-managed HTTP server for personal fitness tracking
//!
//! This is the main entry point for the fittrack application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use fittrack::{
    api::create_router, config::Config, state::AppState, tasks::timer_tick_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("fittrack={},tower_http=info", config.log_level()))
        .init();

    info!("Starting fittrack server v1.0.0");
    info!(
        "Configuration: host={}, port={}, interval={}s x {}",
        config.host, config.port, config.interval_duration, config.interval_count
    );

    // Create application state (seeds the demo user and a stopped engine)
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.timer_config(),
    )?);

    // Start the timer tick background task
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        timer_tick_task(tick_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET|POST          /api/workouts       - Workout log");
    info!("  GET|PATCH|DELETE  /api/workouts/:id   - Single workout");
    info!("  GET|POST          /api/goals          - Goal tracking");
    info!("  PATCH|DELETE      /api/goals/:id      - Single goal");
    info!("  GET|POST          /api/timer-settings - Interval timer settings");
    info!("  GET               /api/timer          - Timer snapshot");
    info!("  POST              /api/timer/start    - Start the timer");
    info!("  POST              /api/timer/pause    - Pause the timer");
    info!("  POST              /api/timer/reset    - Reset the timer");
    info!("  GET               /api/stats          - Progress statistics");
    info!("  GET               /status             - Server status");
    info!("  GET               /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
