//! Table Error Types

use thiserror::Error;

/// Errors raised when a table is malformed or accessed inconsistently
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Table was constructed without any rows
    #[error("Table has no rows")]
    EmptyTable,

    /// A column required by the caller is not present
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A column with this name already exists
    #[error("Column already exists: {0}")]
    DuplicateColumn(String),

    /// Column length does not match the table's row count
    #[error("Column {column} has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Time value is NaN or infinite
    #[error("Time value at row {row} is not finite")]
    NonFiniteTime { row: usize },

    /// Time goes backwards
    #[error("Time decreases at row {row}: {previous} -> {current}")]
    NonMonotonicTime {
        row: usize,
        previous: f64,
        current: f64,
    },

    /// Time or label column selected as a numeric channel
    #[error("{0} is not a channel column")]
    NotAChannel(String),
}
