//! Per-column and per-row statistics over the current dataset snapshot.
//!
//! Every analyzer here is a pure read: it computes fresh results from the
//! dataset it is handed and caches nothing, so report/clean/optimize calls
//! always agree on what they saw and before/after comparisons are meaningful.

pub mod duplicates;
pub mod outliers;
pub mod profiler;

pub use duplicates::{
    constant_columns, detect_duplicates, DuplicateGroup, DuplicateSummary,
};
pub use outliers::{detect_outliers, quantile, OutlierBounds};
pub use profiler::{
    comparable_values, numeric_stats, profile_column, ColumnProfile, NumericStats,
};

/// Rounds to two decimal places, the convention for every reported
/// percentage.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
