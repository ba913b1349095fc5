//! Min-Max Normalization

use crate::error::PreprocessError;
use sensor_table::{ChannelSet, SensorTable};
use tracing::debug;

/// Observed range of a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRange {
    /// Minimum non-missing value
    pub min: f64,
    /// Maximum non-missing value
    pub max: f64,
}

impl ColumnRange {
    /// Range over the non-missing values, `None` if there are none
    pub fn from_values(values: &[f64]) -> Option<Self> {
        values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |range, v| match range {
                None => Some(Self { min: v, max: v }),
                Some(r) => Some(Self {
                    min: r.min.min(v),
                    max: r.max.max(v),
                }),
            })
    }

    /// Whether min-max scaling applies (constant columns are skipped)
    pub fn is_scalable(&self) -> bool {
        self.max > self.min
    }

    /// Map a value into `[0, 1]`
    pub fn scale(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

/// Rescales each channel to `[0, 1]`
///
/// Constant and entirely missing channels are left unchanged rather than
/// divided by an epsilon.
#[derive(Debug, Clone, Default)]
pub struct Normalizer;

impl Normalizer {
    /// Create a new normalizer
    pub fn new() -> Self {
        Self
    }

    /// Normalize a single column
    pub fn normalize_column(&self, values: &[f64]) -> Vec<f64> {
        match ColumnRange::from_values(values) {
            Some(range) if range.is_scalable() => values.iter().map(|&v| range.scale(v)).collect(),
            _ => values.to_vec(),
        }
    }

    /// Normalize every channel of `table`
    pub fn apply(
        &self,
        table: &SensorTable,
        channels: &ChannelSet,
    ) -> Result<SensorTable, PreprocessError> {
        channels.validate(table)?;

        let mut result = table.clone();
        for channel in channels.iter() {
            let values = table.column(channel)?;
            match ColumnRange::from_values(values) {
                Some(range) if range.is_scalable() => {
                    debug!("Normalizing {} from [{}, {}]", channel, range.min, range.max);
                    let scaled = values.iter().map(|&v| range.scale(v)).collect();
                    result.replace_column(channel, scaled)?;
                }
                _ => debug!("Skipping normalization of constant channel {}", channel),
            }
        }
        Ok(result)
    }
}
