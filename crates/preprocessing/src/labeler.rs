//! Interval Label Propagation

use crate::error::PreprocessError;
use sensor_table::{LabelInterval, SensorTable};
use tracing::{debug, warn};

/// Label given to samples outside every interval
pub const NOT_READY: &str = "NotReady";

/// Assigns interval labels to individual samples
#[derive(Debug, Clone)]
pub struct Labeler {
    /// Name of the label column to add
    column: String,
    /// Label for samples no interval covers
    default_label: String,
}

impl Labeler {
    /// Create a labeler writing to `column`
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            default_label: NOT_READY.to_string(),
        }
    }

    /// Override the default label
    pub fn with_default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Per-sample labels for the given time column
    ///
    /// Intervals are applied in iteration order; where they overlap the
    /// later one wins. Both interval ends are inclusive. `time` must be
    /// non-decreasing.
    pub fn label_samples(&self, time: &[f64], intervals: &[LabelInterval]) -> Vec<String> {
        let mut labels = vec![self.default_label.clone(); time.len()];

        for interval in intervals {
            if !interval.is_finite() {
                warn!(
                    "Skipping label interval {:?} with non-finite bounds",
                    interval.label
                );
                continue;
            }

            let first = time.partition_point(|&t| t < interval.start);
            let last = time.partition_point(|&t| t <= interval.end());
            if last <= first {
                continue;
            }
            for label in &mut labels[first..last] {
                label.clone_from(&interval.label);
            }
        }

        labels
    }

    /// Add the label column to `table`
    ///
    /// Without intervals (absent or empty) the table is returned unchanged.
    pub fn apply(
        &self,
        table: &SensorTable,
        intervals: Option<&[LabelInterval]>,
    ) -> Result<SensorTable, PreprocessError> {
        let intervals = match intervals {
            Some(intervals) if !intervals.is_empty() => intervals,
            _ => {
                debug!("No label intervals supplied; skipping labelling");
                return Ok(table.clone());
            }
        };

        let labels = self.label_samples(table.time(), intervals);
        let labelled = labels.iter().filter(|l| **l != self.default_label).count();
        debug!(
            "Applied {} label intervals: {} of {} samples labelled",
            intervals.len(),
            labelled,
            labels.len()
        );

        let mut result = table.clone();
        result.set_labels(self.column.clone(), labels)?;
        Ok(result)
    }
}

impl Default for Labeler {
    fn default() -> Self {
        Self::new("label")
    }
}
