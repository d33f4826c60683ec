//! State management module
//!
//! This module contains the countdown state machine, the structures it renders
//! and the shared application state that hosts it.

pub mod app_state;
pub mod controller;
pub mod controls;
pub mod fields;
pub mod progress;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use controller::{TimerController, TimerView};
pub use controls::{Action, Button, ButtonSize, ControlSet, SoundIcon};
pub use fields::{Field, InputFields};
pub use progress::ProgressRing;
pub use timer_state::{Phase, TimerState};
