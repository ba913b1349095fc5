//! Sensor Recording Preprocessing
//!
//! Provides missing-value filling, IQR outlier clipping, min-max
//! normalization and interval label propagation for sensor tables.

mod clipper;
mod error;
mod labeler;
mod normalizer;
mod pipeline;

pub use clipper::{fill_missing, quantile, IqrBounds, OutlierClipper, DEFAULT_IQR_MULTIPLIER};
pub use error::PreprocessError;
pub use labeler::{Labeler, NOT_READY};
pub use normalizer::{ColumnRange, Normalizer};
pub use pipeline::{PreprocessConfig, PreprocessingPipeline};
