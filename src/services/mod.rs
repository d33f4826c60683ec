//! External collaborators module
//!
//! This module contains the audio and terminal side effects the timer drives.

pub mod alarm;
pub mod terminal;

// Re-export main types and functions
pub use alarm::{Alarm, SilentAlarm, TerminalBell};
pub use terminal::{set_terminal_title, write_title};
