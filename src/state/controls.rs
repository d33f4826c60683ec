//! Declarative description of the control buttons for each phase

use serde::{Deserialize, Serialize};

use super::Phase;

/// What a button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Stop,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    Main,
    Small,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub action: Action,
    pub size: ButtonSize,
}

impl Button {
    fn new(action: Action, size: ButtonSize) -> Self {
        let label = match action {
            Action::Start => "START",
            Action::Stop => "STOP",
            Action::Reset => "RESET",
        };
        Self {
            label: label.to_string(),
            action,
            size,
        }
    }
}

/// The set of buttons the controls container shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSet {
    pub buttons: Vec<Button>,
}

impl ControlSet {
    pub fn for_phase(phase: Phase) -> Self {
        use Action::*;
        use ButtonSize::*;

        let buttons = match phase {
            Phase::Idle => vec![Button::new(Start, Main)],
            Phase::Running => vec![Button::new(Stop, Small), Button::new(Reset, Small)],
            Phase::Paused => vec![Button::new(Start, Small), Button::new(Reset, Small)],
            Phase::Expired => vec![Button::new(Reset, Main)],
        };
        Self { buttons }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.buttons.iter().map(|b| b.action).collect()
    }
}

/// Icon shown on the sound toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundIcon {
    VolumeHigh,
    VolumeXmark,
}

impl SoundIcon {
    pub fn for_enabled(enabled: bool) -> Self {
        if enabled {
            SoundIcon::VolumeHigh
        } else {
            SoundIcon::VolumeXmark
        }
    }
}
