//! Finite-Difference Derivatives

use crate::columns::FeatureKind;
use crate::error::FeatureError;
use sensor_table::{ChannelSet, SensorTable};
use tracing::debug;

/// First and second derivatives of a column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivatives {
    /// Rate of change
    pub first: Vec<f64>,
    /// Acceleration
    pub second: Vec<f64>,
}

/// Backward finite differences against the time column
///
/// Undefined values (first rows, repeated timestamps, missing inputs) are
/// reported as 0.
#[derive(Debug, Clone, Default)]
pub struct DerivativeEstimator;

/// `num / den`, or `None` for a zero denominator or non-finite result
fn ratio(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 {
        return None;
    }
    let r = num / den;
    r.is_finite().then_some(r)
}

impl DerivativeEstimator {
    /// Create a new estimator
    pub fn new() -> Self {
        Self
    }

    /// Derivatives of `values` sampled at `time`
    pub fn compute(&self, time: &[f64], values: &[f64]) -> Derivatives {
        let n = time.len().min(values.len());

        let mut first: Vec<Option<f64>> = vec![None; n];
        let mut second: Vec<Option<f64>> = vec![None; n];

        for i in 1..n {
            let dt = time[i] - time[i - 1];
            first[i] = ratio(values[i] - values[i - 1], dt);
            // an undefined first derivative poisons the next second derivative
            second[i] = match (first[i], first[i - 1]) {
                (Some(curr), Some(prev)) => ratio(curr - prev, dt),
                _ => None,
            };
        }

        Derivatives {
            first: first.into_iter().map(|d| d.unwrap_or(0.0)).collect(),
            second: second.into_iter().map(|d| d.unwrap_or(0.0)).collect(),
        }
    }

    /// Append `deriv1`/`deriv2` columns for every channel
    pub fn apply(
        &self,
        table: &SensorTable,
        channels: &ChannelSet,
    ) -> Result<SensorTable, FeatureError> {
        channels.validate(table)?;

        let mut result = table.clone();
        for channel in channels.iter() {
            let derivatives = self.compute(table.time(), table.column(channel)?);
            result.push_column(FeatureKind::Deriv1.column_name(channel), derivatives.first)?;
            result.push_column(FeatureKind::Deriv2.column_name(channel), derivatives.second)?;
        }

        debug!("Derivatives for {} channels", channels.len());
        Ok(result)
    }
}
