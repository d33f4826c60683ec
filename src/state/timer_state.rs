//! Timer state structure and lifecycle phase

use serde::{Deserialize, Serialize};

/// Countdown lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Expired,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Expired => "expired",
        }
    }
}

/// Durations and flags of the current countdown cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Duration captured when the current cycle started, `0` when none
    pub initial_duration_seconds: u32,
    pub remaining_seconds: u32,
    /// Last duration the timer was explicitly started with
    pub last_confirmed_duration_seconds: u32,
    pub phase: Phase,
    pub sound_enabled: bool,
}

impl TimerState {
    /// Create an idle timer state
    pub fn new(sound_enabled: bool) -> Self {
        Self {
            initial_duration_seconds: 0,
            remaining_seconds: 0,
            last_confirmed_duration_seconds: 0,
            phase: Phase::Idle,
            sound_enabled,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Whether a cycle snapshot (running or paused) exists
    pub fn has_cycle(&self) -> bool {
        self.initial_duration_seconds != 0
    }

    /// Begin a cycle of `total` seconds and remember it as confirmed
    pub fn confirm(&mut self, total: u32) {
        self.initial_duration_seconds = total;
        self.remaining_seconds = total;
        self.last_confirmed_duration_seconds = total;
    }

    /// Drop the cycle snapshot
    pub fn clear_cycle(&mut self) {
        self.initial_duration_seconds = 0;
        self.remaining_seconds = 0;
    }

    /// Fraction of the cycle left, `None` without a cycle
    pub fn remaining_ratio(&self) -> Option<f64> {
        if self.initial_duration_seconds == 0 {
            None
        } else {
            Some(f64::from(self.remaining_seconds) / f64::from(self.initial_duration_seconds))
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(true)
    }
}
