//! Transform primitives: column drops, row filters, lossless casts.
//!
//! Every primitive builds a complete new [`Dataset`] from the input
//! snapshot; nothing is modified in place. Callers apply the result by
//! swapping their dataset reference, so a failed transform leaves the
//! pre-call state untouched.

use arrow::array::{Array, ArrayRef, BooleanArray};
use arrow::compute::{filter_record_batch, kernels::cast::cast_with_options, CastOptions};
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::display::FormatOptions;
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::error::{Result, ScourError};

/// Drops the named columns, preserving the order of the rest.
pub fn drop_columns(dataset: &Dataset, names: &[String]) -> Result<Dataset> {
    if names.is_empty() {
        return Ok(dataset.clone());
    }
    let retained: Vec<usize> = dataset
        .column_names()
        .iter()
        .enumerate()
        .filter(|(_, name)| !names.contains(name))
        .map(|(index, _)| index)
        .collect();
    let batch = dataset.batch().project(&retained)?;
    Dataset::try_new(batch)
}

/// Mask selecting the rows with no missing entry in any column.
pub fn complete_row_mask(dataset: &Dataset) -> Vec<bool> {
    let rows = dataset.row_count();
    let mut mask = vec![true; rows];
    for index in 0..dataset.column_count() {
        let array = dataset.column_at(index);
        if array.null_count() == 0 {
            continue;
        }
        for (row, keep) in mask.iter_mut().enumerate() {
            if array.is_null(row) {
                *keep = false;
            }
        }
    }
    mask
}

/// Keeps the rows selected by `mask`.
///
/// Errors with [`ScourError::EmptyDataset`] when nothing would survive, so
/// the caller's pre-call snapshot stays valid.
pub fn filter_rows(dataset: &Dataset, mask: &[bool]) -> Result<Dataset> {
    if mask.iter().all(|&keep| keep) {
        return Ok(dataset.clone());
    }
    let predicate = BooleanArray::from(mask.to_vec());
    let batch = filter_record_batch(dataset.batch(), &predicate)?;
    Dataset::try_new(batch)
}

/// Converts the listed columns to their target storage types.
///
/// Casts run with `safe = false`: a value that cannot be represented in the
/// target type is an error, never a silent null. Callers validate ranges
/// beforehand, so an error here means a violated invariant, and the input
/// snapshot survives untouched.
pub fn apply_casts(dataset: &Dataset, targets: &[(String, DataType)]) -> Result<Dataset> {
    if targets.is_empty() {
        return Ok(dataset.clone());
    }
    let options = CastOptions {
        safe: false,
        format_options: FormatOptions::default(),
    };

    let schema = dataset.batch().schema();
    let mut fields = Vec::with_capacity(dataset.column_count());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(dataset.column_count());
    for (index, field) in schema.fields().iter().enumerate() {
        let array = dataset.column_at(index);
        match targets.iter().find(|(name, _)| name == field.name()) {
            Some((_, target)) => {
                let cast = cast_with_options(array, target, &options)?;
                if cast.null_count() != array.null_count() {
                    return Err(ScourError::internal(format!(
                        "cast of column '{}' changed its missing count",
                        field.name()
                    )));
                }
                fields.push(Arc::new(
                    field.as_ref().clone().with_data_type(target.clone()),
                ));
                arrays.push(cast);
            }
            None => {
                fields.push(field.clone());
                arrays.push(array.clone());
            }
        }
    }
    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
    Dataset::try_new(batch)
}
