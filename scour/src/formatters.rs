//! Report formatting for quality reports.
//!
//! This module provides formatters for [`QualityReport`], allowing callers
//! to render reports as human-readable text or JSON. Formatting is a thin
//! presentation layer; nothing in the core depends on it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use scour::formatters::{HumanFormatter, ReportFormatter};
//!
//! let formatter = HumanFormatter::new();
//! let output = formatter.format(&report)?;
//! println!("{output}");
//! ```

use std::fmt::Write;

use crate::core::QualityReport;
use crate::error::{Result, ScourError};

/// Configuration options for report formatting.
#[derive(Debug, Clone)]
pub struct FormatterConfig {
    /// Include the duplicated rows themselves, not just their counts.
    pub include_duplicate_rows: bool,
    /// Maximum number of duplicate groups to render (`None` for all).
    pub max_duplicate_groups: Option<usize>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            include_duplicate_rows: true,
            max_duplicate_groups: None,
        }
    }
}

/// Trait for rendering a quality report into an output format.
pub trait ReportFormatter {
    /// Formats the report.
    fn format(&self, report: &QualityReport) -> Result<String>;
}

/// Renders a report as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Pretty-print the output.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a pretty-printing JSON formatter.
    pub fn new() -> Self {
        Self { pretty: true }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &QualityReport) -> Result<String> {
        let out = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        out.map_err(|e| ScourError::internal(format!("report serialization failed: {e}")))
    }
}

/// Renders a report as sectioned, human-readable text.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    config: FormatterConfig,
}

impl HumanFormatter {
    /// Creates a formatter with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formatter with the given configuration.
    pub fn with_config(config: FormatterConfig) -> Self {
        Self { config }
    }
}

/// A title between two `=` rules of the same length.
fn header(title: &str) -> String {
    let rule = "=".repeat(title.len());
    format!("{rule}\n{title}\n{rule}")
}

impl ReportFormatter for HumanFormatter {
    fn format(&self, report: &QualityReport) -> Result<String> {
        let mut out = String::new();
        let w = &mut out;

        writeln!(w, "{}", header("Constant Columns")).ok();
        if report.constant_columns.is_empty() {
            writeln!(w, "No constant columns found.\n").ok();
        } else {
            writeln!(
                w,
                "Dropped at construction: {}\n",
                report.constant_columns.join(", ")
            )
            .ok();
        }

        writeln!(w, "{}", header("Duplicated Rows")).ok();
        if report.duplicates.is_empty() {
            writeln!(w, "No duplicated rows.\n").ok();
        } else {
            writeln!(
                w,
                "The dataset has {} duplicated rows ({} beyond first occurrences), \
                 which is {}% from the dataset, duplicated rows are:\n",
                report.duplicates.total_instances,
                report.duplicates.extra_count,
                report.duplicates.percentage
            )
            .ok();
            if self.config.include_duplicate_rows {
                let limit = self
                    .config
                    .max_duplicate_groups
                    .unwrap_or(report.duplicates.groups.len());
                for group in report.duplicates.groups.iter().take(limit) {
                    writeln!(
                        w,
                        "  rows {:?}: {}",
                        group.indices,
                        group.values.join(" | ")
                    )
                    .ok();
                }
                writeln!(w).ok();
            }
        }

        writeln!(w, "{}", header("Numerical Columns Optimization")).ok();
        if report.downcasts.is_empty() {
            writeln!(w, "No numerical columns to optimize.\n").ok();
        } else {
            writeln!(w, "These numerical columns can be downgraded:\n").ok();
            for (target, columns) in report.downcasts.grouped_by_target() {
                writeln!(w, "  {target}: {}", columns.join(", ")).ok();
            }
            writeln!(w).ok();
        }

        writeln!(w, "{}", header("Categorical Columns Optimization")).ok();
        if report.categoricals.is_empty() {
            writeln!(w, "No columns to convert to categorical.\n").ok();
        } else {
            writeln!(w, "These columns can be converted to categorical:\n").ok();
            for rec in &report.categoricals.recommendations {
                writeln!(w, "  {}: {}", rec.column, rec.distinct_values.join(", ")).ok();
            }
            writeln!(w).ok();
        }

        writeln!(w, "{}", header("Outliers")).ok();
        if report.outliers.is_empty() {
            writeln!(w, "No outliers.\n").ok();
        } else {
            writeln!(
                w,
                "  {:<20} {:>12} {:>12} {:>7} {:>7} {:>7} {:>11}",
                "column", "lower_fence", "upper_fence", "below", "above", "total", "percentage"
            )
            .ok();
            for bounds in &report.outliers {
                writeln!(
                    w,
                    "  {:<20} {:>12} {:>12} {:>7} {:>7} {:>7} {:>11}",
                    bounds.column,
                    bounds.lower_fence,
                    bounds.upper_fence,
                    bounds.count_below,
                    bounds.count_above,
                    bounds.total(),
                    bounds.percentage
                )
                .ok();
            }
            writeln!(w).ok();
        }

        writeln!(w, "{}", header("Missing Values")).ok();
        if report.missing.is_empty() {
            writeln!(w, "No missing values.\n").ok();
        } else {
            writeln!(
                w,
                "  {:<20} {:>14} {:>18}",
                "column", "missing_counts", "missing_percentage"
            )
            .ok();
            for missing in &report.missing {
                writeln!(
                    w,
                    "  {:<20} {:>14} {:>18}",
                    missing.column, missing.count, missing.percentage
                )
                .ok();
            }
            writeln!(w).ok();
        }

        if !report.unavailable.is_empty() {
            writeln!(w, "{}", header("Unavailable Columns")).ok();
            for entry in &report.unavailable {
                writeln!(w, "  {}: {}", entry.column, entry.reason).ok();
            }
        }

        Ok(out)
    }
}
