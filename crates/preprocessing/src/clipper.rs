//! IQR Outlier Clipping

use crate::error::PreprocessError;
use sensor_table::{ChannelSet, SensorTable};
use tracing::{debug, warn};

/// Default Tukey fence multiplier
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Fill missing (`NaN`) values forward, then backward
///
/// Each gap takes the nearest preceding value; leading gaps take the first
/// observed value. An entirely missing column is returned unchanged.
pub fn fill_missing(values: &[f64]) -> Vec<f64> {
    let mut filled = values.to_vec();

    let mut last = None;
    for v in filled.iter_mut() {
        if v.is_nan() {
            if let Some(prev) = last {
                *v = prev;
            }
        } else {
            last = Some(*v);
        }
    }

    if let Some(first) = filled.iter().position(|v| !v.is_nan()) {
        let value = filled[first];
        filled[..first].fill(value);
    }

    filled
}

/// Quantile of sorted, non-missing values using linear interpolation
/// between closest ranks
///
/// Returns `None` for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Interquartile range and the clipping fences derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    /// 25th percentile
    pub q1: f64,
    /// 75th percentile
    pub q3: f64,
    /// Lower fence
    pub lower: f64,
    /// Upper fence
    pub upper: f64,
}

impl IqrBounds {
    /// Compute bounds over the non-missing values of a column
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Replace values outside the fences with the fence
    pub fn clip(&self, value: f64) -> f64 {
        // NaN fences (from infinite inputs) leave values as they are
        if value < self.lower {
            self.lower
        } else if value > self.upper {
            self.upper
        } else {
            value
        }
    }
}

/// Fills gaps and clips each channel to its IQR fences
#[derive(Debug, Clone)]
pub struct OutlierClipper {
    multiplier: f64,
}

impl OutlierClipper {
    /// Create a clipper with the given fence multiplier
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier: if multiplier.is_finite() {
                multiplier.max(0.0)
            } else {
                DEFAULT_IQR_MULTIPLIER
            },
        }
    }

    /// Fence multiplier in use
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Fill and clip a single column
    pub fn clip_column(&self, values: &[f64]) -> Vec<f64> {
        let filled = fill_missing(values);
        match IqrBounds::from_values(&filled, self.multiplier) {
            Some(bounds) => filled.into_iter().map(|v| bounds.clip(v)).collect(),
            None => filled,
        }
    }

    /// Clean every channel of `table`
    pub fn apply(
        &self,
        table: &SensorTable,
        channels: &ChannelSet,
    ) -> Result<SensorTable, PreprocessError> {
        channels.validate(table)?;

        let mut result = table.clone();
        for channel in channels.iter() {
            let values = table.column(channel)?;
            if values.iter().all(|v| v.is_nan()) {
                warn!("Channel {} has no values; leaving it missing", channel);
                continue;
            }

            let clipped = self.clip_column(values);
            let changed = values
                .iter()
                .zip(&clipped)
                .filter(|(a, b)| a.to_bits() != b.to_bits())
                .count();
            debug!("Clipped {}: {} of {} values changed", channel, changed, values.len());

            result.replace_column(channel, clipped)?;
        }
        Ok(result)
    }
}

impl Default for OutlierClipper {
    fn default() -> Self {
        Self::new(DEFAULT_IQR_MULTIPLIER)
    }
}
