//! Preprocessing Error Types

use sensor_table::TableError;
use thiserror::Error;

/// Errors during preprocessing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreprocessError {
    /// Malformed input table
    #[error(transparent)]
    Table(#[from] TableError),

    /// Invalid pipeline configuration
    #[error("Invalid preprocessing config: {0}")]
    InvalidConfig(String),
}
