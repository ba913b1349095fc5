//! Ground-truth label intervals

use serde::{Deserialize, Serialize};

/// A labelled time span, as exported by the annotation tool
///
/// Field names map onto the label file header
/// (`Time(Seconds)`, `Length(Seconds)`, `Label(string)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelInterval {
    /// Interval start (seconds)
    #[serde(rename = "Time(Seconds)")]
    pub start: f64,
    /// Interval length (seconds)
    #[serde(rename = "Length(Seconds)")]
    pub duration: f64,
    /// Label applied to samples inside the interval
    #[serde(rename = "Label(string)")]
    pub label: String,
}

impl LabelInterval {
    /// Create a new interval
    pub fn new(start: f64, duration: f64, label: impl Into<String>) -> Self {
        Self {
            start,
            duration,
            label: label.into(),
        }
    }

    /// End of the interval (inclusive)
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Whether `time` falls inside `[start, end]`
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end()
    }

    /// Whether start and duration are usable numbers
    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.duration.is_finite()
    }
}
