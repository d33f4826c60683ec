//! Countdown Timer - A countdown widget driven over HTTP
//!
//! This library provides the countdown state machine (input normalization,
//! pause/resume/reset, progress ring, alarm) and the service that hosts it.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerController};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
