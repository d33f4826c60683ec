//! Countdown Timer - A countdown widget driven over HTTP
//!
//! This is the main entry point for the countdown-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_timer::{
    api::create_router,
    config::Config,
    services::{Alarm, TerminalBell},
    state::{AppState, TimerController},
    tasks::{title_sync_task, TICK_PERIOD},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_timer={},tower_http=info", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting countdown-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, radius={}, sound={}",
          config.host, config.port, config.radius, config.sound_enabled());

    // Create application state
    let alarm: Box<dyn Alarm> = Box::new(TerminalBell::new());
    let controller = TimerController::new(config.radius, config.sound_enabled(), alarm);
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        controller,
        TICK_PERIOD,
    ));

    // Mirror the title into the terminal
    if !config.no_title {
        let title_state = Arc::clone(&state);
        tokio::spawn(async move {
            title_sync_task(title_state).await;
        });
    }

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                 - Start or resume the countdown");
    info!("  POST /stop                  - Pause the countdown");
    info!("  POST /reset                 - Restore the last started duration");
    info!("  POST /sound                 - Toggle the alarm sound");
    info!("  POST /fields/:field/input   - Keystroke edit (hours, minutes, seconds)");
    info!("  POST /fields/:field/blur    - Format a field");
    info!("  POST /fields/:field/wheel   - Wheel adjustment");
    info!("  GET  /status                - Current view");
    info!("  GET  /health                - Health check");

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
