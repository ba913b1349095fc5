//! Feature Engineering Engine
//!
//! Provides rolling statistical, derivative and frequency domain feature
//! extraction over sensor tables.

mod columns;
mod derivatives;
mod error;
mod features;
mod fft;
mod statistics;

pub use columns::FeatureKind;
pub use derivatives::{DerivativeEstimator, Derivatives};
pub use error::FeatureError;
pub use features::{FeatureConfig, FeatureEngineeringPipeline, SPECTRAL_WINDOW_MULTIPLIER};
pub use fft::{
    rfft_frequencies, DominantFrequency, SpectralFeatureExtractor, SpectralSeries,
    MIN_SPECTRAL_SAMPLES,
};
pub use statistics::{RollingSeries, RollingStatistics, WindowStatistics};
