//! Hour/minute/second input fields and their normalization rules

use serde::{Deserialize, Serialize};

/// One of the three editable time fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Hours,
    Minutes,
    Seconds,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Hours, Field::Minutes, Field::Seconds];

    /// Inclusive bounds used by wheel adjustment
    pub fn bounds(self) -> (u32, u32) {
        match self {
            Field::Hours => (0, 99),
            Field::Minutes | Field::Seconds => (0, 59),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Hours => "hours",
            Field::Minutes => "minutes",
            Field::Seconds => "seconds",
        }
    }
}

/// Zero-pad a value to two digits
pub fn pad(value: u32) -> String {
    format!("{:02}", value)
}

/// Numeric value of a field's text, `0` when empty or unparseable
pub fn numeric_value(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

/// Keystroke normalization: digits only, at most two of them, and
/// minutes/seconds never above 59.
pub fn clamp_raw_input(field: Field, text: &str) -> String {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).take(2).collect();

    match field {
        Field::Minutes | Field::Seconds if numeric_value(&digits) > 59 => "59".to_string(),
        _ => digits,
    }
}

/// The text currently shown in the three fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFields {
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl InputFields {
    pub fn new() -> Self {
        Self {
            hours: pad(0),
            minutes: pad(0),
            seconds: pad(0),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Hours => &self.hours,
            Field::Minutes => &self.minutes,
            Field::Seconds => &self.seconds,
        }
    }

    pub fn set(&mut self, field: Field, text: String) {
        match field {
            Field::Hours => self.hours = text,
            Field::Minutes => self.minutes = text,
            Field::Seconds => self.seconds = text,
        }
    }

    pub fn value(&self, field: Field) -> u32 {
        numeric_value(self.get(field))
    }

    /// Re-render a field as its zero-padded two digit form (focus loss)
    pub fn format_field(&mut self, field: Field) {
        let value = self.value(field);
        self.set(field, pad(value));
    }

    pub fn format_all(&mut self) {
        for field in Field::ALL {
            self.format_field(field);
        }
    }

    /// Write a duration back into the fields as H, M, S
    pub fn write_total(&mut self, total_seconds: u32) {
        self.hours = pad(total_seconds / 3600);
        self.minutes = pad((total_seconds % 3600) / 60);
        self.seconds = pad(total_seconds % 60);
    }

    pub fn total_seconds(&self) -> u32 {
        self.value(Field::Hours) * 3600 + self.value(Field::Minutes) * 60 + self.value(Field::Seconds)
    }

    /// `HH:MM:SS` as written to the page title
    pub fn title(&self) -> String {
        format!("{}:{}:{}", self.hours, self.minutes, self.seconds)
    }
}

impl Default for InputFields {
    fn default() -> Self {
        Self::new()
    }
}
