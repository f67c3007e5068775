//! Error types for the scour library.
//!
//! This module provides the error handling strategy using `thiserror` for
//! automatic error trait implementations. All errors in the library are
//! represented by the `ScourError` enum.

use thiserror::Error;

/// The main error type for the scour library.
#[derive(Error, Debug)]
pub enum ScourError {
    /// Error related to configuration. The message names the offending
    /// parameter and its valid range; out-of-range values are rejected at
    /// call time, never clamped.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The dataset has no rows or no columns, so statistics such as quartiles
    /// and value ranges are undefined.
    #[error("Dataset is empty ({rows} rows, {columns} columns); statistics are undefined")]
    EmptyDataset { rows: usize, columns: usize },

    /// A required column is not present in the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// A column's storage type does not match what an operation expected.
    #[error("Type mismatch for column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: String,
        found: String,
    },

    /// A column uses a storage type no analyzer supports.
    #[error("Column '{column}' has unsupported storage type {data_type}")]
    UnsupportedType { column: String, data_type: String },

    /// A column holds only missing values, so its numeric statistics are
    /// undefined.
    #[error("Column '{column}' has no non-missing values")]
    AllMissing { column: String },

    /// Error from Arrow operations.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ScourError>`.
///
/// This is the standard `Result` type used throughout the library.
pub type Result<T> = std::result::Result<T, ScourError>;

impl ScourError {
    /// Creates a configuration error with the given message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Creates a column-not-found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }

    /// Creates an unsupported-type error.
    pub fn unsupported_type(column: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::UnsupportedType {
            column: column.into(),
            data_type: data_type.into(),
        }
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_message() {
        let err = ScourError::configuration("'min_missing_ratio' should be between 0 and 1");
        assert_eq!(
            err.to_string(),
            "Configuration error: 'min_missing_ratio' should be between 0 and 1"
        );
    }

    #[test]
    fn test_empty_dataset_error() {
        let err = ScourError::EmptyDataset {
            rows: 0,
            columns: 3,
        };
        assert!(err.to_string().contains("0 rows, 3 columns"));
    }

    #[test]
    fn test_column_not_found() {
        let err = ScourError::column_not_found("user_id");
        assert_eq!(err.to_string(), "Column 'user_id' not found in dataset");
    }

    #[test]
    fn test_all_missing() {
        let err = ScourError::AllMissing {
            column: "score".to_string(),
        };
        assert_eq!(err.to_string(), "Column 'score' has no non-missing values");
    }
}
