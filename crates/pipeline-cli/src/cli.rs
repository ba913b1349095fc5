//! Command-line arguments

use crate::Settings;
use clap::Parser;
use std::path::PathBuf;

/// Turn a sensor recording into a labelled feature table.
#[derive(Parser, Debug)]
#[command(name = "sensor-features", version)]
pub struct Args {
    /// Recording CSV (time column plus numeric channels).
    #[arg(long, short)]
    pub data: PathBuf,

    /// Label CSV with Time(Seconds), Length(Seconds), Label(string).
    /// A path that does not exist is treated as "no labels".
    #[arg(long, short)]
    pub labels: Option<PathBuf>,

    /// Output CSV path. Defaults to stdout.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// TOML settings file.
    #[arg(long, short, env = "SENSOR_FEATURES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comma-separated channel selection (default: every numeric column).
    #[arg(long, value_delimiter = ',')]
    pub channels: Option<Vec<String>>,

    /// Rolling window size in samples (spectral window is 5x this).
    #[arg(long)]
    pub window: Option<usize>,

    /// Compute dominant frequency features (slow).
    #[arg(long)]
    pub frequency: bool,

    /// Skip gap filling and outlier clipping.
    #[arg(long)]
    pub no_clean: bool,

    /// Skip min-max normalization.
    #[arg(long)]
    pub no_normalize: bool,

    /// Skip label propagation.
    #[arg(long)]
    pub no_labels: bool,

    /// Skip rolling statistics.
    #[arg(long)]
    pub no_rolling: bool,

    /// Skip derivatives.
    #[arg(long)]
    pub no_derivatives: bool,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Flags take precedence over file and environment settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(channels) = &self.channels {
            settings.channels = Some(channels.clone());
        }
        if let Some(window) = self.window {
            settings.features.window_size = window;
        }
        if self.frequency {
            settings.features.include_frequency = true;
        }
        if self.no_clean {
            settings.preprocess.clean = false;
        }
        if self.no_normalize {
            settings.preprocess.normalize = false;
        }
        if self.no_labels {
            settings.preprocess.add_labels = false;
        }
        if self.no_rolling {
            settings.features.include_rolling = false;
        }
        if self.no_derivatives {
            settings.features.include_derivatives = false;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
    }
}
