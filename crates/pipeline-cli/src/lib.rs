//! Sensor Feature Batch Runner
//!
//! Loads a recording and its label file, runs preprocessing and feature
//! engineering, and writes the resulting feature table.

mod cli;
pub mod io;
mod settings;

pub use cli::Args;
pub use settings::{LoggingSettings, Settings, ENV_PREFIX};

use anyhow::{Context, Result};
use feature_engine::FeatureEngineeringPipeline;
use preprocessing::PreprocessingPipeline;
use sensor_table::{LabelInterval, SensorTable};
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Initialize logging (stderr, so CSV on stdout stays clean)
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let level = Level::from_str(&settings.level)
        .with_context(|| format!("invalid log level {:?}", settings.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    installed.context("Failed to set tracing subscriber")
}

/// Run preprocessing then feature engineering over a loaded recording
///
/// The channel set is resolved from the raw table once and shared by both
/// pipelines.
pub fn run(
    table: &SensorTable,
    labels: Option<&[LabelInterval]>,
    settings: &Settings,
) -> Result<SensorTable> {
    let channels = settings
        .schema
        .channels(table, settings.channels.as_deref())
        .context("resolving channels")?;
    info!(
        "Channels: {}",
        channels.iter().collect::<Vec<_>>().join(", ")
    );

    let preprocessing =
        PreprocessingPipeline::new(settings.preprocess.clone(), settings.schema.clone())?;
    let features =
        FeatureEngineeringPipeline::new(settings.features.clone(), settings.schema.clone())?;

    let cleaned = preprocessing
        .run(table, &channels, labels)
        .context("preprocessing")?;
    let output = features
        .run(&cleaned, &channels)
        .context("feature engineering")?;

    info!(
        "Produced feature table: {} rows, {} columns",
        output.num_rows(),
        output.num_columns()
    );
    Ok(output)
}
