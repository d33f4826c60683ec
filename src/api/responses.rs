//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerView;

/// Body of a keystroke edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRequest {
    pub value: String,
}

/// Body of a wheel event, `delta_y < 0` scrolls up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelRequest {
    pub delta_y: f64,
}

/// API response structure for action endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Set for wheel events: whether the page should suppress scrolling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumed: Option<bool>,
    pub timer: TimerView,
}

impl ApiResponse {
    /// Create a response whose status is the timer's phase
    pub fn new(message: impl Into<String>, timer: TimerView) -> Self {
        Self {
            status: timer.phase.as_str().to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            consumed: None,
            timer,
        }
    }

    pub fn with_consumed(mut self, consumed: bool) -> Self {
        self.consumed = Some(consumed);
        self
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub ticking: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
