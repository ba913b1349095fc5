//! Rolling Statistical Features

use crate::columns::FeatureKind;
use crate::error::FeatureError;
use sensor_table::{ChannelSet, SensorTable};
use tracing::debug;

/// Statistics of a single window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowStatistics {
    /// Mean value
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
}

impl WindowStatistics {
    /// Compute statistics over the non-missing values of a window
    ///
    /// A window with one value has zero deviation; a window with no
    /// values yields all zeros.
    pub fn compute(values: &[f64]) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for &v in values.iter().filter(|v| !v.is_nan()) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }

        if count == 0 {
            return Self::default();
        }

        let n = count as f64;
        let mean = sum / n;

        let std_dev = if count > 1 {
            let m2: f64 = values
                .iter()
                .filter(|v| !v.is_nan())
                .map(|&v| (v - mean) * (v - mean))
                .sum();
            (m2 / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Self {
            mean,
            std_dev,
            min,
            max,
        }
    }
}

/// Rolling statistics for every row of a column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RollingSeries {
    pub mean: Vec<f64>,
    pub std_dev: Vec<f64>,
    pub min: Vec<f64>,
    pub max: Vec<f64>,
}

impl RollingSeries {
    fn with_capacity(n: usize) -> Self {
        Self {
            mean: Vec::with_capacity(n),
            std_dev: Vec::with_capacity(n),
            min: Vec::with_capacity(n),
            max: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, stats: WindowStatistics) {
        self.mean.push(stats.mean);
        self.std_dev.push(stats.std_dev);
        self.min.push(stats.min);
        self.max.push(stats.max);
    }
}

/// Trailing-window mean/std/min/max per channel
///
/// Row `i` uses rows `[max(0, i - W + 1), i]`, so the first `W - 1` rows
/// see a shorter window.
#[derive(Debug, Clone)]
pub struct RollingStatistics {
    window: usize,
}

impl RollingStatistics {
    /// Default window size (samples)
    pub const DEFAULT_WINDOW: usize = 20;

    /// Create with the given window size
    pub fn new(window: usize) -> Result<Self, FeatureError> {
        if window == 0 {
            return Err(FeatureError::InvalidWindow(window));
        }
        Ok(Self { window })
    }

    /// Window size in samples
    pub fn window(&self) -> usize {
        self.window
    }

    /// Rolling statistics of one column
    pub fn compute(&self, values: &[f64]) -> RollingSeries {
        let mut series = RollingSeries::with_capacity(values.len());
        for i in 0..values.len() {
            let start = (i + 1).saturating_sub(self.window);
            series.push(WindowStatistics::compute(&values[start..=i]));
        }
        series
    }

    /// Append rolling statistic columns for every channel
    pub fn apply(
        &self,
        table: &SensorTable,
        channels: &ChannelSet,
    ) -> Result<SensorTable, FeatureError> {
        channels.validate(table)?;

        let mut result = table.clone();
        for channel in channels.iter() {
            let series = self.compute(table.column(channel)?);
            result.push_column(FeatureKind::RollingMean.column_name(channel), series.mean)?;
            result.push_column(FeatureKind::RollingStd.column_name(channel), series.std_dev)?;
            result.push_column(FeatureKind::RollingMin.column_name(channel), series.min)?;
            result.push_column(FeatureKind::RollingMax.column_name(channel), series.max)?;
        }

        debug!(
            "Rolling statistics (window={}) for {} channels",
            self.window,
            channels.len()
        );
        Ok(result)
    }
}

impl Default for RollingStatistics {
    fn default() -> Self {
        Self {
            window: Self::DEFAULT_WINDOW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mean_computation() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = WindowStatistics::compute(&values);
        assert!((stats.mean - 3.0).abs() < 0.001);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_std_dev_computation() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = WindowStatistics::compute(&values);
        // Sample std dev: sqrt(32 / 7)
        assert!((stats.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_window() {
        let stats = WindowStatistics::compute(&[4.2]);
        assert_eq!(stats, WindowStatistics { mean: 4.2, std_dev: 0.0, min: 4.2, max: 4.2 });
    }

    #[test]
    fn test_empty_values() {
        let values: Vec<f64> = vec![];
        let stats = WindowStatistics::compute(&values);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(WindowStatistics::compute(&[f64::NAN, f64::NAN]), WindowStatistics::default());
    }

    #[test]
    fn test_missing_values_skipped() {
        let stats = WindowStatistics::compute(&[1.0, f64::NAN, 3.0]);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
    }

    #[test]
    fn test_window_grows_then_slides() {
        let rolling = RollingStatistics::new(3).unwrap();
        let series = rolling.compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_eq!(series.mean, vec![1.0, 1.5, 2.0, 3.0, 4.0]);
        assert_eq!(series.min, vec![1.0, 1.0, 1.0, 2.0, 3.0]);
        assert_eq!(series.max, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(series.std_dev[0], 0.0);
        assert!((series.std_dev[1] - 0.5f64.sqrt()).abs() < 1e-12);
        assert!((series.std_dev[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_window_rejected() {
        assert_eq!(RollingStatistics::new(0).unwrap_err(), FeatureError::InvalidWindow(0));
    }

    #[test]
    fn test_apply_appends_four_columns() {
        let table = SensorTable::new("Time", vec![0.0, 1.0, 2.0])
            .and_then(|t| t.with_column("speed", vec![3.0, 5.0, 7.0]))
            .unwrap();
        let result = RollingStatistics::default()
            .apply(&table, &ChannelSet::all(&table))
            .unwrap();

        assert_eq!(result.num_columns(), table.num_columns() + 4);
        assert_eq!(result.column("speed_rolling_mean").unwrap(), &[3.0, 4.0, 5.0]);
        assert_eq!(result.column("speed_rolling_max").unwrap(), &[3.0, 5.0, 7.0]);
        assert_eq!(result.column("speed").unwrap(), table.column("speed").unwrap());
    }

    proptest! {
        #[test]
        fn prop_first_row_is_own_value(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..50),
            window in 1usize..40,
        ) {
            let series = RollingStatistics::new(window).unwrap().compute(&values);
            prop_assert_eq!(series.mean.len(), values.len());
            prop_assert_eq!(series.mean[0], values[0]);
            prop_assert_eq!(series.min[0], values[0]);
            prop_assert_eq!(series.max[0], values[0]);
            prop_assert_eq!(series.std_dev[0], 0.0);
        }
    }
}
