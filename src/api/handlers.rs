//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::state::{AppState, Field};
use super::responses::{ApiResponse, HealthResponse, InputRequest, StatusResponse, WheelRequest};

type ApiResult = Result<Json<ApiResponse>, StatusCode>;

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("Failed to {}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let (started, view) = state.start().map_err(|e| internal_error("start timer", e))?;
    let message = if started {
        info!("Start endpoint called - countdown running from {}", view.title);
        "Countdown running"
    } else {
        "Nothing to start"
    };
    Ok(Json(ApiResponse::new(message, view)))
}

/// Handle POST /stop - Pause the countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let (stopped, view) = state.stop().map_err(|e| internal_error("stop timer", e))?;
    let message = if stopped {
        info!("Stop endpoint called - countdown paused at {}", view.title);
        "Countdown paused"
    } else {
        "Countdown was not running"
    };
    Ok(Json(ApiResponse::new(message, view)))
}

/// Handle POST /reset - Restore the last confirmed duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let view = state.reset().map_err(|e| internal_error("reset timer", e))?;
    info!("Reset endpoint called - timer shows {}", view.title);
    Ok(Json(ApiResponse::new("Timer reset", view)))
}

/// Handle POST /sound - Toggle the alarm sound
pub async fn sound_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    let (enabled, view) = state.toggle_sound().map_err(|e| internal_error("toggle sound", e))?;
    let message = if enabled { "Sound enabled" } else { "Sound disabled" };
    Ok(Json(ApiResponse::new(message, view)))
}

/// Handle POST /fields/:field/input - Keystroke edit
pub async fn input_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<Field>,
    Json(request): Json<InputRequest>,
) -> ApiResult {
    let view = state
        .edit_field(field, &request.value)
        .map_err(|e| internal_error("edit field", e))?;
    Ok(Json(ApiResponse::new(format!("{} edited", field.as_str()), view)))
}

/// Handle POST /fields/:field/blur - Format a field after focus loss
pub async fn blur_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<Field>,
) -> ApiResult {
    let view = state
        .blur_field(field)
        .map_err(|e| internal_error("format field", e))?;
    Ok(Json(ApiResponse::new(format!("{} formatted", field.as_str()), view)))
}

/// Handle POST /fields/:field/wheel - Adjust a field by one step
pub async fn wheel_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<Field>,
    Json(request): Json<WheelRequest>,
) -> ApiResult {
    let (consumed, view) = state
        .scroll_field(field, request.delta_y)
        .map_err(|e| internal_error("scroll field", e))?;
    let message = if consumed {
        format!("{} adjusted", field.as_str())
    } else {
        "Fields are locked while running".to_string()
    };
    Ok(Json(ApiResponse::new(message, view).with_consumed(consumed)))
}

/// Handle GET /status - Return the current view and server info
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state.get_view().map_err(|e| internal_error("get timer view", e))?;
    let ticking = state.is_ticking().map_err(|e| internal_error("get tick schedule", e))?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        ticking,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
