//! Feature Extraction Error Types

use sensor_table::TableError;
use thiserror::Error;

/// Errors during feature extraction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Malformed input table
    #[error(transparent)]
    Table(#[from] TableError),

    /// Window size of zero
    #[error("Invalid window size: {0}")]
    InvalidWindow(usize),
}
