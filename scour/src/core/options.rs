//! Session- and operation-level configuration.
//!
//! Validation happens at call time, before an operation touches data, and
//! never clamps: an out-of-range value is rejected with an error naming the
//! offending parameter and its valid range.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Result, ScourError};

/// Opaque caller options passed through to a collaborator (a renderer, a
/// drop primitive) without interpretation by the core.
pub type OpaqueOptions = HashMap<String, serde_json::Value>;

/// Session-level configuration, set once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of distinct values for a text column to be considered
    /// categorical. The threshold is inclusive.
    pub max_num_categories: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_num_categories: 10,
        }
    }
}

impl SessionConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_num_categories == 0 {
            return Err(ScourError::configuration(
                "'max_num_categories' should be a positive integer",
            ));
        }
        Ok(())
    }
}

/// Options for the clean operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Columns whose missing ratio exceeds this value (strictly) are
    /// dropped. Must lie in `[0, 1]`.
    pub min_missing_ratio: f64,
    /// Whether to drop every remaining row that contains a missing value
    /// after the column drop.
    pub drop_missing_rows: bool,
    /// Opaque options recorded alongside the row-drop step.
    pub row_drop_options: OpaqueOptions,
    /// Opaque options recorded alongside the duplicate-drop step.
    pub duplicate_drop_options: OpaqueOptions,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            min_missing_ratio: 0.05,
            drop_missing_rows: true,
            row_drop_options: OpaqueOptions::new(),
            duplicate_drop_options: OpaqueOptions::new(),
        }
    }
}

impl CleanOptions {
    /// Validates the options.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_missing_ratio) || self.min_missing_ratio.is_nan() {
            return Err(ScourError::configuration(
                "'min_missing_ratio' should be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Options for the report operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Whether to ask the renderer for a missingness matrix.
    pub show_missing_matrix: bool,
    /// Whether to ask the renderer for a missingness heatmap.
    pub show_missing_heatmap: bool,
    /// Opaque options forwarded to the matrix renderer verbatim.
    pub matrix_options: OpaqueOptions,
    /// Opaque options forwarded to the heatmap renderer verbatim.
    pub heatmap_options: OpaqueOptions,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_missing_matrix: true,
            show_missing_heatmap: true,
            matrix_options: OpaqueOptions::new(),
            heatmap_options: OpaqueOptions::new(),
        }
    }
}
