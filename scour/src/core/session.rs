//! The owning session: report, clean, optimize.
//!
//! A [`ScourSession`] holds exclusive ownership of one dataset snapshot for
//! its lifetime. Operations are synchronous, single-threaded passes over
//! the in-memory data; each mutating operation builds a complete new
//! snapshot and swaps it in only on success, so an operation that fails
//! leaves the dataset exactly as it found it.
//!
//! Clean and optimize are independent and idempotent: invoking either again
//! with nothing left to do reports zero affected rows and columns and
//! changes no state.

use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::analyzers::duplicates::{constant_columns, dedup_keep_first_mask};
use crate::core::options::{CleanOptions, ReportOptions, SessionConfig};
use crate::core::report::{build_plans, build_report, QualityReport};
use crate::dataset::transform::{apply_casts, complete_row_mask, drop_columns, filter_rows};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::viz::{MissingnessRenderer, NoopRenderer};

/// What a clean call changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanSummary {
    /// Columns dropped for exceeding the missing-ratio threshold.
    pub dropped_columns: Vec<String>,
    /// Rows dropped for containing missing values.
    pub dropped_missing_rows: usize,
    /// Duplicate rows dropped (occurrences beyond the first).
    pub dropped_duplicate_rows: usize,
}

impl CleanSummary {
    /// Whether the call found nothing to do.
    pub fn is_noop(&self) -> bool {
        self.dropped_columns.is_empty()
            && self.dropped_missing_rows == 0
            && self.dropped_duplicate_rows == 0
    }
}

/// One storage conversion applied by optimize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedConversion {
    /// Converted column.
    pub column: String,
    /// Storage type before the conversion.
    pub from: String,
    /// Storage type after the conversion.
    pub to: String,
}

/// What an optimize call changed. Columns already at minimal width are
/// excluded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizeSummary {
    /// Numeric downcasts applied.
    pub downcasts: Vec<AppliedConversion>,
    /// Text columns converted to dictionary encoding.
    pub categorical_columns: Vec<String>,
    /// Arrow buffer memory before the call, in bytes.
    pub bytes_before: usize,
    /// Arrow buffer memory after the call, in bytes.
    pub bytes_after: usize,
}

impl OptimizeSummary {
    /// Whether the call found nothing to do.
    pub fn is_noop(&self) -> bool {
        self.downcasts.is_empty() && self.categorical_columns.is_empty()
    }
}

/// The owning session over one dataset.
///
/// # Examples
///
/// ```rust
/// use arrow::array::{ArrayRef, Int64Array, StringArray};
/// use arrow::datatypes::{DataType, Field, Schema};
/// use arrow::record_batch::RecordBatch;
/// use scour::core::{CleanOptions, ReportOptions, ScourSession, SessionConfig};
/// use std::sync::Arc;
///
/// # fn example() -> scour::error::Result<()> {
/// let batch = RecordBatch::try_new(
///     Arc::new(Schema::new(vec![
///         Field::new("id", DataType::Int64, true),
///         Field::new("city", DataType::Utf8, true),
///     ])),
///     vec![
///         Arc::new(Int64Array::from(vec![Some(1), Some(2), Some(2)])) as ArrayRef,
///         Arc::new(StringArray::from(vec![Some("rome"), Some("oslo"), Some("oslo")]))
///             as ArrayRef,
///     ],
/// )?;
///
/// let mut session = ScourSession::new(batch, SessionConfig::default())?;
/// let report = session.report(&ReportOptions::default())?;
/// println!("{} duplicated rows", report.duplicates.total_instances);
///
/// session.clean(&CleanOptions::default())?;
/// let summary = session.optimize()?;
/// println!("saved {} bytes", summary.bytes_before - summary.bytes_after);
/// # Ok(())
/// # }
/// ```
pub struct ScourSession {
    dataset: Dataset,
    config: SessionConfig,
    constant_columns: Vec<String>,
    renderer: Box<dyn MissingnessRenderer>,
}

impl std::fmt::Debug for ScourSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScourSession")
            .field("rows", &self.dataset.row_count())
            .field("columns", &self.dataset.column_count())
            .field("config", &self.config)
            .field("constant_columns", &self.constant_columns)
            .finish()
    }
}

/// Validates a fresh batch and drops its constant columns.
fn init_dataset(batch: RecordBatch) -> Result<(Dataset, Vec<String>)> {
    let dataset = Dataset::try_new(batch)?;
    let constants = constant_columns(&dataset);
    if constants.is_empty() {
        return Ok((dataset, constants));
    }
    let dataset = drop_columns(&dataset, &constants)?;
    info!(
        columns = ?constants,
        "dropped single-valued columns at construction"
    );
    Ok((dataset, constants))
}

impl ScourSession {
    /// Creates a session over `batch` with the default (no-op) renderer.
    ///
    /// Validates the configuration, rejects empty shapes, and drops
    /// constant columns once. The dropped names stay available through
    /// [`ScourSession::constant_columns`] and in every report.
    pub fn new(batch: RecordBatch, config: SessionConfig) -> Result<Self> {
        Self::with_renderer(batch, config, Box::new(NoopRenderer))
    }

    /// Creates a session with an injected missingness renderer.
    pub fn with_renderer(
        batch: RecordBatch,
        config: SessionConfig,
        renderer: Box<dyn MissingnessRenderer>,
    ) -> Result<Self> {
        config.validate()?;
        let (dataset, constants) = init_dataset(batch)?;
        Ok(Self {
            dataset,
            config,
            constant_columns: constants,
            renderer,
        })
    }

    /// The current dataset snapshot.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Constant columns dropped at construction.
    pub fn constant_columns(&self) -> &[String] {
        &self.constant_columns
    }

    /// Replaces the categorical cardinality threshold, revalidating it.
    pub fn set_max_num_categories(&mut self, max_num_categories: usize) -> Result<()> {
        let config = SessionConfig { max_num_categories };
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Replaces the dataset, re-running construction-time validation and the
    /// constant-column drop.
    pub fn set_dataset(&mut self, batch: RecordBatch) -> Result<()> {
        let (dataset, constants) = init_dataset(batch)?;
        self.dataset = dataset;
        self.constant_columns = constants;
        Ok(())
    }

    /// Builds a data-quality report over the current snapshot.
    ///
    /// Read-only: nothing in the session changes. When the snapshot has
    /// missing values and the options ask for visualizations, the injected
    /// renderer is invoked with the missing-value table and the opaque
    /// render options; its output is never consumed.
    #[instrument(skip_all)]
    pub fn report(&self, options: &ReportOptions) -> Result<QualityReport> {
        let report = build_report(&self.dataset, &self.config, &self.constant_columns)?;
        if !report.missing.is_empty() {
            if options.show_missing_matrix {
                self.renderer
                    .render_matrix(&report.missing, &options.matrix_options);
            }
            if options.show_missing_heatmap {
                self.renderer
                    .render_heatmap(&report.missing, &options.heatmap_options);
            }
        }
        Ok(report)
    }

    /// Drops high-missingness columns, then rows with missing values, then
    /// duplicate rows.
    ///
    /// The order is contractual: columns whose missing ratio exceeds
    /// `min_missing_ratio` are dropped first, so rows that were missing only
    /// in a column about to be discarded are not lost. Finding nothing to
    /// drop is a no-op, not an error.
    #[instrument(skip_all)]
    pub fn clean(&mut self, options: &CleanOptions) -> Result<CleanSummary> {
        options.validate()?;

        let rows = self.dataset.row_count();
        let dropped_columns: Vec<String> = self
            .dataset
            .column_names()
            .into_iter()
            .enumerate()
            .filter(|(index, _)| {
                let missing = self.dataset.column_at(*index).null_count();
                missing as f64 / rows as f64 > options.min_missing_ratio
            })
            .map(|(_, name)| name)
            .collect();
        let mut working = drop_columns(&self.dataset, &dropped_columns)?;

        let mut dropped_missing_rows = 0;
        if options.drop_missing_rows {
            let mask = complete_row_mask(&working);
            dropped_missing_rows = mask.iter().filter(|&&keep| !keep).count();
            working = filter_rows(&working, &mask)?;
        }

        let mask = dedup_keep_first_mask(&working);
        let dropped_duplicate_rows = mask.iter().filter(|&&keep| !keep).count();
        working = filter_rows(&working, &mask)?;

        debug!(
            ?dropped_columns,
            dropped_missing_rows,
            dropped_duplicate_rows,
            row_drop_options = ?options.row_drop_options,
            duplicate_drop_options = ?options.duplicate_drop_options,
            "clean pass complete"
        );
        self.dataset = working;
        Ok(CleanSummary {
            dropped_columns,
            dropped_missing_rows,
            dropped_duplicate_rows,
        })
    }

    /// Applies every recommended downcast and categorical conversion.
    ///
    /// Plans are recomputed against the current snapshot, applied in one
    /// pass, and the new snapshot swapped in only when every conversion
    /// succeeded. Columns already at minimal width are untouched and absent
    /// from the summary.
    #[instrument(skip_all)]
    pub fn optimize(&mut self) -> Result<OptimizeSummary> {
        let plans = build_plans(&self.dataset, &self.config);
        let bytes_before = self.dataset.memory_bytes();

        let mut targets: Vec<(String, DataType)> = Vec::new();
        let mut downcasts = Vec::new();
        for rec in &plans.downcasts.recommendations {
            targets.push((rec.column.clone(), rec.target.data_type()));
            downcasts.push(AppliedConversion {
                column: rec.column.clone(),
                from: rec.current.clone(),
                to: rec.target.name().to_string(),
            });
        }

        let dictionary = DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        let mut categorical_columns = Vec::new();
        for rec in &plans.categoricals.recommendations {
            targets.push((rec.column.clone(), dictionary.clone()));
            categorical_columns.push(rec.column.clone());
        }

        let optimized = apply_casts(&self.dataset, &targets)?;
        self.dataset = optimized;
        let bytes_after = self.dataset.memory_bytes();
        info!(
            conversions = targets.len(),
            bytes_before, bytes_after, "optimize pass complete"
        );
        Ok(OptimizeSummary {
            downcasts,
            categorical_columns,
            bytes_before,
            bytes_after,
        })
    }
}
