//! Circular progress indicator

use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS: f64 = 100.0;

/// Stroke offset of a ring of fixed circumference. An offset of `0` draws the
/// full ring, an offset equal to the circumference draws nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRing {
    pub circumference: f64,
    pub offset: f64,
}

impl ProgressRing {
    pub fn new(radius: f64) -> Self {
        Self {
            circumference: 2.0 * std::f64::consts::PI * radius,
            offset: 0.0,
        }
    }

    /// Show `ratio` of the ring as remaining
    pub fn set_ratio(&mut self, ratio: f64) {
        self.offset = self.circumference - ratio * self.circumference;
    }

    pub fn fill(&mut self) {
        self.offset = 0.0;
    }

    pub fn empty(&mut self) {
        self.offset = self.circumference;
    }
}
