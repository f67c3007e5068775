//! Structured data-quality report.
//!
//! A [`QualityReport`] is a read-only snapshot composed from the analyzers
//! and advisors: constant columns, duplicate rows, the downcast and
//! categorical plans, outlier bounds, and the missing-value table. Each
//! section can be empty independently of the others. A failure while
//! analyzing a single column never aborts the report; the column is listed
//! under [`QualityReport::unavailable`] instead and every other section is
//! built as usual.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::advisors::{advise_categorical, resolve_downcast, CategoricalPlan, DowncastPlan};
use crate::advisors::downcast::DowncastRecommendation;
use crate::analyzers::{
    comparable_values, detect_duplicates, detect_outliers, numeric_stats, round2,
    DuplicateSummary, OutlierBounds,
};
use crate::core::options::SessionConfig;
use crate::dataset::{ColumnKind, Dataset};
use crate::error::{Result, ScourError};

/// Missingness summary for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingColumn {
    /// Column name.
    pub column: String,
    /// Number of missing entries.
    pub count: usize,
    /// Missing entries as a percentage of all rows, rounded to two decimal
    /// places.
    pub percentage: f64,
}

/// A column a section could not be computed for, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailableColumn {
    /// Column name.
    pub column: String,
    /// Human-readable failure description.
    pub reason: String,
}

/// A point-in-time data-quality report over the current dataset snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Rows in the snapshot the report describes.
    pub row_count: usize,
    /// Columns in the snapshot the report describes.
    pub column_count: usize,
    /// Constant columns dropped when the session was constructed.
    pub constant_columns: Vec<String>,
    /// Duplicate-row summary with the duplicated rows themselves.
    pub duplicates: DuplicateSummary,
    /// Numeric columns that can be losslessly narrowed.
    pub downcasts: DowncastPlan,
    /// Text columns worth dictionary-encoding, with their distinct values.
    pub categoricals: CategoricalPlan,
    /// Outlier bounds for numeric columns that have outliers, sorted by
    /// total outlier count, descending. Bounds are computed for every
    /// numeric column; zero-outlier columns are merely omitted from this
    /// listing.
    pub outliers: Vec<OutlierBounds>,
    /// Columns with missing entries, sorted by missing count, descending.
    pub missing: Vec<MissingColumn>,
    /// Columns whose statistics could not be computed, with reasons.
    pub unavailable: Vec<UnavailableColumn>,
}

/// The advisor output for one dataset snapshot. Shared between report and
/// optimize so both decide from identical inputs.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlanSet {
    pub downcasts: DowncastPlan,
    pub categoricals: CategoricalPlan,
    pub unavailable: Vec<UnavailableColumn>,
}

/// Builds the downcast and categorical plans for the current snapshot.
pub(crate) fn build_plans(dataset: &Dataset, config: &SessionConfig) -> PlanSet {
    let mut plans = PlanSet::default();
    for (index, name) in dataset.column_names().into_iter().enumerate() {
        let array = dataset.column_at(index);
        let kind = ColumnKind::from_data_type(array.data_type());
        match kind {
            ColumnKind::Integer | ColumnKind::Float => match numeric_stats(&name, array) {
                Ok(stats) => {
                    if let Some(target) = resolve_downcast(array.data_type(), &stats) {
                        plans.downcasts.recommendations.push(DowncastRecommendation {
                            column: name,
                            current: array.data_type().to_string(),
                            target,
                        });
                    }
                }
                Err(err) => plans.unavailable.push(UnavailableColumn {
                    column: name,
                    reason: err.to_string(),
                }),
            },
            ColumnKind::Text => {
                match advise_categorical(&name, array, config.max_num_categories) {
                    Ok(Some(rec)) => plans.categoricals.recommendations.push(rec),
                    Ok(None) => {}
                    Err(err) => plans.unavailable.push(UnavailableColumn {
                        column: name,
                        reason: err.to_string(),
                    }),
                }
            }
            // Already-encoded, boolean, and unsupported columns get no plan.
            ColumnKind::Categorical | ColumnKind::Boolean | ColumnKind::Other => {}
        }
    }
    plans
}

/// The missing-value table for the current snapshot, sorted by count,
/// descending.
pub(crate) fn missing_table(dataset: &Dataset) -> Vec<MissingColumn> {
    let rows = dataset.row_count();
    let mut table: Vec<MissingColumn> = dataset
        .column_names()
        .into_iter()
        .enumerate()
        .filter_map(|(index, column)| {
            let count = dataset.column_at(index).null_count();
            (count > 0).then(|| MissingColumn {
                column,
                count,
                percentage: round2(count as f64 * 100.0 / rows as f64),
            })
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

/// Builds a full report over the current snapshot.
pub(crate) fn build_report(
    dataset: &Dataset,
    config: &SessionConfig,
    constant_columns: &[String],
) -> Result<QualityReport> {
    let mut plans = build_plans(dataset, config);

    let mut outliers = Vec::new();
    for (index, name) in dataset.column_names().into_iter().enumerate() {
        let array = dataset.column_at(index);
        if !ColumnKind::from_data_type(array.data_type()).is_numeric() {
            continue;
        }
        match comparable_values(&name, array) {
            Ok(values) => {
                // Bounds are always computed; only the listing omits columns
                // without outliers.
                if let Some(bounds) = detect_outliers(&name, &values) {
                    if bounds.total() > 0 {
                        outliers.push(bounds);
                    }
                } else {
                    plans.unavailable.push(UnavailableColumn {
                        column: name.clone(),
                        reason: ScourError::AllMissing { column: name }.to_string(),
                    });
                }
            }
            Err(err) => plans.unavailable.push(UnavailableColumn {
                column: name,
                reason: err.to_string(),
            }),
        }
    }
    outliers.sort_by(|a, b| b.total().cmp(&a.total()));

    // Profiling failures (unsupported storage types) surface once per
    // column.
    for (index, name) in dataset.column_names().into_iter().enumerate() {
        if let Err(err) = crate::analyzers::profile_column(&name, dataset.column_at(index)) {
            plans.unavailable.push(UnavailableColumn {
                column: name,
                reason: err.to_string(),
            });
        }
    }
    plans.unavailable.sort_by(|a, b| a.column.cmp(&b.column));
    plans.unavailable.dedup();

    let duplicates = detect_duplicates(dataset)?;
    debug!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        duplicate_instances = duplicates.total_instances,
        downcast_candidates = plans.downcasts.recommendations.len(),
        categorical_candidates = plans.categoricals.recommendations.len(),
        "built quality report"
    );

    Ok(QualityReport {
        generated_at: Utc::now(),
        row_count: dataset.row_count(),
        column_count: dataset.column_count(),
        constant_columns: constant_columns.to_vec(),
        duplicates,
        downcasts: plans.downcasts,
        categoricals: plans.categoricals,
        outliers,
        missing: missing_table(dataset),
        unavailable: plans.unavailable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;
    use std::sync::Arc;

    fn dataset() -> Dataset {
        let batch = RecordBatch::try_new(
            Arc::new(Schema::new(vec![
                Field::new("small", DataType::Int64, true),
                Field::new("price", DataType::Float64, true),
                Field::new("city", DataType::Utf8, true),
            ])),
            vec![
                Arc::new(Int64Array::from(vec![
                    Some(1),
                    Some(2),
                    Some(3),
                    Some(4),
                    None,
                ])) as ArrayRef,
                Arc::new(Float64Array::from(vec![
                    Some(1.5),
                    Some(2.5),
                    Some(3.5),
                    Some(4.5),
                    Some(5.5),
                ])) as ArrayRef,
                Arc::new(StringArray::from(vec![
                    Some("rome"),
                    Some("oslo"),
                    Some("rome"),
                    Some("lima"),
                    Some("oslo"),
                ])) as ArrayRef,
            ],
        )
        .unwrap();
        Dataset::try_new(batch).unwrap()
    }

    #[test]
    fn test_plans_cover_numeric_and_text() {
        let plans = build_plans(&dataset(), &SessionConfig::default());
        let downcast_columns: Vec<&str> = plans
            .downcasts
            .recommendations
            .iter()
            .map(|r| r.column.as_str())
            .collect();
        assert_eq!(downcast_columns, vec!["small", "price"]);
        assert_eq!(plans.categoricals.recommendations.len(), 1);
        assert_eq!(plans.categoricals.recommendations[0].column, "city");
        assert_eq!(
            plans.categoricals.recommendations[0].distinct_values,
            vec!["rome", "oslo", "lima"]
        );
    }

    #[test]
    fn test_missing_table_sorted_descending() {
        let table = missing_table(&dataset());
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].column, "small");
        assert_eq!(table[0].count, 1);
        assert_eq!(table[0].percentage, 20.0);
    }

    #[test]
    fn test_report_sections_independent() {
        let report = build_report(&dataset(), &SessionConfig::default(), &[]).unwrap();
        assert!(report.duplicates.is_empty());
        assert!(!report.downcasts.is_empty());
        assert!(!report.categoricals.is_empty());
        assert!(report.outliers.is_empty());
        assert_eq!(report.missing.len(), 1);
        assert!(report.unavailable.is_empty());
        assert_eq!(report.row_count, 5);
    }

    #[test]
    fn test_all_missing_column_is_isolated() {
        let batch = RecordBatch::try_new(
            Arc::new(Schema::new(vec![
                Field::new("empty", DataType::Float64, true),
                Field::new("ok", DataType::Int64, true),
            ])),
            vec![
                Arc::new(Float64Array::from(vec![None::<f64>, None])) as ArrayRef,
                Arc::new(Int64Array::from(vec![Some(1), Some(2)])) as ArrayRef,
            ],
        )
        .unwrap();
        let ds = Dataset::try_new(batch).unwrap();
        let report = build_report(&ds, &SessionConfig::default(), &[]).unwrap();
        assert_eq!(report.unavailable.len(), 1);
        assert_eq!(report.unavailable[0].column, "empty");
        // The healthy column's sections are unaffected.
        assert!(report
            .downcasts
            .recommendations
            .iter()
            .any(|r| r.column == "ok"));
    }

    #[test]
    fn test_report_serializes() {
        let report = build_report(&dataset(), &SessionConfig::default(), &[]).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"downcasts\""));
        assert!(json.contains("\"missing\""));
    }
}
