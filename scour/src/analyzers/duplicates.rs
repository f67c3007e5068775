//! Duplicate-row and constant-column detection.
//!
//! Two rows are duplicates iff every column's value is equal, where a
//! missing marker equals a missing marker and float cells compare by
//! canonical bit pattern (`NaN == NaN`, `-0.0 == 0.0`). The summary surfaces
//! every occurrence of a duplicated row, not just the repeats beyond the
//! first, so the rows can be inspected in full.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type,
    UInt32Type, UInt64Type, UInt8Type,
};
use arrow::util::display::array_value_to_string;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analyzers::profiler::{canonical_bits, profile_column};
use crate::analyzers::round2;
use crate::dataset::Dataset;
use crate::error::Result;

/// One cell of a row-equality key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey {
    Missing,
    Int(i64),
    UInt(u64),
    FloatBits(u64),
    Text(String),
    Bool(bool),
    /// Fallback for storage types without a dedicated key: Arrow's rendered
    /// cell text.
    Rendered(String),
}

fn cell_key(array: &ArrayRef, row: usize) -> CellKey {
    if array.is_null(row) {
        return CellKey::Missing;
    }
    macro_rules! int_key {
        ($ty:ty) => {
            CellKey::Int(array.as_primitive::<$ty>().value(row) as i64)
        };
    }
    match array.data_type() {
        DataType::Int8 => int_key!(Int8Type),
        DataType::Int16 => int_key!(Int16Type),
        DataType::Int32 => int_key!(Int32Type),
        DataType::Int64 => int_key!(Int64Type),
        DataType::UInt8 => int_key!(UInt8Type),
        DataType::UInt16 => int_key!(UInt16Type),
        DataType::UInt32 => int_key!(UInt32Type),
        DataType::UInt64 => CellKey::UInt(array.as_primitive::<UInt64Type>().value(row)),
        DataType::Float32 => CellKey::FloatBits(canonical_bits(
            array.as_primitive::<Float32Type>().value(row) as f64,
        )),
        DataType::Float64 => CellKey::FloatBits(canonical_bits(
            array.as_primitive::<Float64Type>().value(row),
        )),
        DataType::Utf8 => CellKey::Text(array.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellKey::Text(array.as_string::<i64>().value(row).to_string()),
        DataType::Boolean => CellKey::Bool(array.as_boolean().value(row)),
        _ => CellKey::Rendered(
            array_value_to_string(array, row).unwrap_or_else(|_| "?".to_string()),
        ),
    }
}

/// All occurrences of one duplicated row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Row indices of every occurrence, in dataset order.
    pub indices: Vec<usize>,
    /// The row's values rendered for display, one string per column.
    pub values: Vec<String>,
}

/// Dataset-level duplicate-row summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateSummary {
    /// Occurrences beyond the first of each duplicated row.
    pub extra_count: usize,
    /// Total occurrences of duplicated rows, first occurrences included.
    pub total_instances: usize,
    /// `total_instances` as a percentage of all rows, rounded to two
    /// decimal places.
    pub percentage: f64,
    /// The duplicated rows themselves, ordered by first occurrence.
    pub groups: Vec<DuplicateGroup>,
}

impl DuplicateSummary {
    /// Whether the dataset has any duplicated rows.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Finds fully duplicated rows.
pub fn detect_duplicates(dataset: &Dataset) -> Result<DuplicateSummary> {
    let rows = dataset.row_count();
    let columns: Vec<ArrayRef> = (0..dataset.column_count())
        .map(|i| dataset.column_at(i).clone())
        .collect();

    let mut occurrences: HashMap<Vec<CellKey>, Vec<usize>> = HashMap::new();
    for row in 0..rows {
        let key: Vec<CellKey> = columns.iter().map(|c| cell_key(c, row)).collect();
        occurrences.entry(key).or_default().push(row);
    }

    let mut groups: Vec<DuplicateGroup> = occurrences
        .into_values()
        .filter(|indices| indices.len() > 1)
        .map(|indices| DuplicateGroup {
            values: dataset.render_row(indices[0]),
            indices,
        })
        .collect();
    groups.sort_by_key(|g| g.indices[0]);

    let total_instances: usize = groups.iter().map(|g| g.indices.len()).sum();
    let extra_count = total_instances - groups.len();
    Ok(DuplicateSummary {
        extra_count,
        total_instances,
        percentage: round2(total_instances as f64 * 100.0 / rows as f64),
        groups,
    })
}

/// Mask selecting the rows that survive duplicate removal: the first
/// occurrence of every row-value combination.
pub fn dedup_keep_first_mask(dataset: &Dataset) -> Vec<bool> {
    let rows = dataset.row_count();
    let columns: Vec<ArrayRef> = (0..dataset.column_count())
        .map(|i| dataset.column_at(i).clone())
        .collect();
    let mut seen: HashMap<Vec<CellKey>, ()> = HashMap::with_capacity(rows);
    let mut mask = Vec::with_capacity(rows);
    for row in 0..rows {
        let key: Vec<CellKey> = columns.iter().map(|c| cell_key(c, row)).collect();
        mask.push(seen.insert(key, ()).is_none());
    }
    mask
}

/// Names of constant columns (one distinct value, zero missing entries).
///
/// Columns whose storage type the profiler does not support are skipped;
/// they cannot be proven constant.
pub fn constant_columns(dataset: &Dataset) -> Vec<String> {
    dataset
        .column_names()
        .into_iter()
        .enumerate()
        .filter(|(index, name)| {
            profile_column(name, dataset.column_at(*index))
                .map(|p| p.is_constant)
                .unwrap_or(false)
        })
        .map(|(_, name)| name)
        .collect()
}
