//! Preprocessing Pipeline

use crate::clipper::{OutlierClipper, DEFAULT_IQR_MULTIPLIER};
use crate::error::PreprocessError;
use crate::labeler::{Labeler, NOT_READY};
use crate::normalizer::Normalizer;
use sensor_table::{ChannelSet, LabelInterval, Schema, SensorTable};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Preprocessing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Fill gaps and clip outliers
    pub clean: bool,
    /// Min-max scale channels
    pub normalize: bool,
    /// Propagate interval labels onto samples
    pub add_labels: bool,
    /// IQR fence multiplier for clipping
    pub iqr_multiplier: f64,
    /// Label for samples outside every interval
    pub default_label: String,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            clean: true,
            normalize: true,
            add_labels: true,
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            default_label: NOT_READY.to_string(),
        }
    }
}

impl PreprocessConfig {
    /// Check the configuration before building a pipeline
    pub fn validate(&self) -> Result<(), PreprocessError> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(PreprocessError::InvalidConfig(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        if self.default_label.is_empty() {
            return Err(PreprocessError::InvalidConfig(
                "default_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Runs clip → normalize → label over a table
pub struct PreprocessingPipeline {
    config: PreprocessConfig,
    schema: Schema,
    clipper: OutlierClipper,
    normalizer: Normalizer,
    labeler: Labeler,
}

impl PreprocessingPipeline {
    /// Build a pipeline for tables following `schema`
    pub fn new(config: PreprocessConfig, schema: Schema) -> Result<Self, PreprocessError> {
        config.validate()?;
        Ok(Self {
            clipper: OutlierClipper::new(config.iqr_multiplier),
            normalizer: Normalizer::new(),
            labeler: Labeler::new(schema.label_column.clone())
                .with_default_label(config.default_label.clone()),
            config,
            schema,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Run the enabled stages in fixed order
    ///
    /// The schema and channel set are validated once here; every stage then
    /// works on the same declared channels.
    pub fn run(
        &self,
        table: &SensorTable,
        channels: &ChannelSet,
        labels: Option<&[LabelInterval]>,
    ) -> Result<SensorTable, PreprocessError> {
        self.schema.validate(table)?;
        channels.validate(table)?;

        info!(
            "Preprocessing {} rows x {} channels (clean={}, normalize={}, labels={})",
            table.num_rows(),
            channels.len(),
            self.config.clean,
            self.config.normalize,
            self.config.add_labels && labels.is_some()
        );

        let mut result = table.clone();

        if self.config.clean {
            result = self.clipper.apply(&result, channels)?;
        }

        if self.config.normalize {
            result = self.normalizer.apply(&result, channels)?;
        }

        if self.config.add_labels {
            result = self.labeler.apply(&result, labels)?;
        }

        Ok(result)
    }
}
