//! Feature Engineering Pipeline

use crate::derivatives::DerivativeEstimator;
use crate::error::FeatureError;
use crate::fft::SpectralFeatureExtractor;
use crate::statistics::RollingStatistics;
use sensor_table::{ChannelSet, Schema, SensorTable};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Spectral window = statistics window × this
pub const SPECTRAL_WINDOW_MULTIPLIER: usize = 5;

/// Feature engineering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Rolling mean/std/min/max
    pub include_rolling: bool,
    /// First and second derivatives
    pub include_derivatives: bool,
    /// Dominant frequency/magnitude (expensive: one FFT per row per channel)
    pub include_frequency: bool,
    /// Rolling window size (samples)
    pub window_size: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            include_rolling: true,
            include_derivatives: true,
            include_frequency: false,
            window_size: RollingStatistics::DEFAULT_WINDOW,
        }
    }
}

impl FeatureConfig {
    /// Window used for spectral features
    pub fn spectral_window(&self) -> usize {
        self.window_size.saturating_mul(SPECTRAL_WINDOW_MULTIPLIER)
    }
}

/// Runs rolling statistics → derivatives → spectral features over a table
pub struct FeatureEngineeringPipeline {
    config: FeatureConfig,
    schema: Schema,
    rolling: RollingStatistics,
    derivatives: DerivativeEstimator,
}

impl FeatureEngineeringPipeline {
    /// Build a pipeline for tables following `schema`
    pub fn new(config: FeatureConfig, schema: Schema) -> Result<Self, FeatureError> {
        let rolling = RollingStatistics::new(config.window_size)?;
        Ok(Self {
            config,
            schema,
            rolling,
            derivatives: DerivativeEstimator::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Append feature columns for every declared channel
    ///
    /// Each stage reads only the declared channels, never columns a previous
    /// stage appended.
    pub fn run(
        &self,
        table: &SensorTable,
        channels: &ChannelSet,
    ) -> Result<SensorTable, FeatureError> {
        self.schema.validate(table)?;
        channels.validate(table)?;

        info!(
            "Feature engineering on {} rows x {} channels \
             (rolling={}, derivatives={}, frequency={}, window={})",
            table.num_rows(),
            channels.len(),
            self.config.include_rolling,
            self.config.include_derivatives,
            self.config.include_frequency,
            self.config.window_size
        );

        let mut result = table.clone();

        if self.config.include_rolling {
            result = self.rolling.apply(&result, channels)?;
        }

        if self.config.include_derivatives {
            result = self.derivatives.apply(&result, channels)?;
        }

        if self.config.include_frequency {
            let mut spectral = SpectralFeatureExtractor::new(self.config.spectral_window())?;
            result = spectral.apply(&result, channels)?;
        }

        info!("Feature table has {} columns", result.num_columns());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::FeatureKind;
    use proptest::prelude::*;

    fn recording(n: usize) -> SensorTable {
        let time: Vec<f64> = (0..n).map(|i| i as f64 * 0.02).collect();
        let whisk: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).sin()).collect();
        let load: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
        SensorTable::new("Time", time)
            .and_then(|t| t.with_column("whisk", whisk))
            .and_then(|t| t.with_column("load", load))
            .unwrap()
    }

    fn default_pipeline() -> FeatureEngineeringPipeline {
        FeatureEngineeringPipeline::new(FeatureConfig::default(), Schema::default()).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = FeatureConfig::default();
        assert!(config.include_rolling);
        assert!(config.include_derivatives);
        assert!(!config.include_frequency);
        assert_eq!(config.window_size, 20);
        assert_eq!(config.spectral_window(), 100);
    }

    #[test]
    fn test_default_pipeline_columns() {
        let table = recording(30);
        let channels = ChannelSet::all(&table);
        let pipeline = default_pipeline();
        let result = pipeline.run(&table, &channels).unwrap();

        // 6 features per channel, no spectral
        assert_eq!(result.num_columns(), table.num_columns() + 2 * 6);
        assert!(result.has_column("whisk_rolling_std"));
        assert!(result.has_column("load_deriv2"));
        assert!(!result.has_column("whisk_dom_freq"));
        // derivatives are never taken of rolling outputs
        assert!(!result.has_column("whisk_rolling_mean_deriv1"));
        assert_eq!(result.time(), table.time());
    }

    #[test]
    fn test_all_stages() {
        let table = recording(120);
        let channels = ChannelSet::all(&table);
        let config = FeatureConfig {
            include_frequency: true,
            window_size: 4,
            ..Default::default()
        };
        let pipeline = FeatureEngineeringPipeline::new(config, Schema::default()).unwrap();
        let result = pipeline.run(&table, &channels).unwrap();

        for channel in ["whisk", "load"] {
            for kind in FeatureKind::ALL {
                let column = result.column(&kind.column_name(channel)).unwrap();
                assert_eq!(column.len(), 120);
                assert!(column.iter().all(|v| v.is_finite()));
            }
        }

        // spectral window is 20 samples: rows up to index 9 have too few
        let freq = result.column("whisk_dom_freq").unwrap();
        assert_eq!(freq[9], 0.0);
        assert!(freq[10] > 0.0);

        // load rises 25 per second
        let deriv1 = result.column("load_deriv1").unwrap();
        assert_eq!(deriv1[0], 0.0);
        assert!((deriv1[50] - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_selected_channels_only() {
        let table = recording(10);
        let pipeline = default_pipeline();
        let result = pipeline.run(&table, &ChannelSet::new(["load"])).unwrap();
        assert!(result.has_column("load_rolling_mean"));
        assert!(!result.has_column("whisk_rolling_mean"));
    }

    #[test]
    fn test_disabled_stages_return_input_columns() {
        let table = recording(10);
        let config = FeatureConfig {
            include_rolling: false,
            include_derivatives: false,
            ..Default::default()
        };
        let pipeline = FeatureEngineeringPipeline::new(config, Schema::default()).unwrap();
        let result = pipeline.run(&table, &ChannelSet::all(&table)).unwrap();
        assert_eq!(result.num_columns(), table.num_columns());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = FeatureConfig {
            window_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            FeatureEngineeringPipeline::new(config, Schema::default()),
            Err(FeatureError::InvalidWindow(0))
        ));
    }

    #[test]
    fn test_rerun_on_feature_table_fails() {
        let table = recording(10);
        let channels = ChannelSet::all(&table);
        let pipeline = default_pipeline();
        let once = pipeline.run(&table, &channels).unwrap();
        assert!(pipeline.run(&once, &channels).is_err());
    }

    #[test]
    fn test_window_longer_than_table() {
        let table = recording(30);
        let config = FeatureConfig {
            include_frequency: true,
            window_size: usize::MAX,
            ..Default::default()
        };
        assert_eq!(config.spectral_window(), usize::MAX);

        let pipeline = FeatureEngineeringPipeline::new(config, Schema::default()).unwrap();
        let result = pipeline.run(&table, &ChannelSet::all(&table)).unwrap();

        // every window is the whole prefix
        let mean = result.column("load_rolling_mean").unwrap();
        assert!((mean[29] - 7.25).abs() < 1e-9);
        assert_eq!(result.column("whisk_dom_freq").unwrap()[9], 0.0);
        assert!(result.column("whisk_dom_mag").unwrap()[29] > 0.0);
    }

    #[test]
    fn test_all_missing_channel_features_are_zero() {
        let n = 40;
        let table = recording(n)
            .with_column("dropout", vec![f64::NAN; n])
            .unwrap();
        let config = FeatureConfig {
            include_frequency: true,
            window_size: 4,
            ..Default::default()
        };
        let pipeline = FeatureEngineeringPipeline::new(config, Schema::default()).unwrap();
        let result = pipeline.run(&table, &ChannelSet::all(&table)).unwrap();

        for kind in FeatureKind::ALL {
            let column = result.column(&kind.column_name("dropout")).unwrap();
            assert!(
                column.iter().all(|&v| v == 0.0),
                "{} not all zero",
                kind.column_name("dropout")
            );
        }
        // the raw channel stays missing
        assert!(result.column("dropout").unwrap().iter().all(|v| v.is_nan()));
        assert!(result.column("whisk_dom_mag").unwrap()[n - 1] > 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_row_count_preserved(n in 1usize..80, window in 1usize..10) {
            let table = recording(n);
            let config = FeatureConfig {
                include_frequency: true,
                window_size: window,
                ..Default::default()
            };
            let pipeline = FeatureEngineeringPipeline::new(config, Schema::default()).unwrap();
            let result = pipeline.run(&table, &ChannelSet::all(&table)).unwrap();

            prop_assert_eq!(result.num_rows(), n);
            for channel in ["whisk", "load"] {
                for kind in FeatureKind::ALL {
                    prop_assert_eq!(result.column(&kind.column_name(channel)).unwrap().len(), n);
                }
            }
        }
    }
}
