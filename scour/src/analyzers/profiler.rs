//! Column profiling: semantic kind, value range, missingness, cardinality.
//!
//! A [`ColumnProfile`] is ephemeral: it is recomputed from the current
//! dataset snapshot on every report or transform call, never persisted, so
//! every consumer sees statistics that reflect the latest mutation.
//!
//! The profiler also computes [`NumericStats`], the exact input contract of
//! the downcast resolver: observed min/max, whether any present value has a
//! fractional component, whether every present value survives a round trip
//! through `f32`, and whether the column has missing entries.

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::dataset::ColumnKind;
use crate::error::{Result, ScourError};

/// Summary statistics for one column, recomputed per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Semantic kind derived from the Arrow storage type.
    pub kind: ColumnKind,
    /// Minimum non-missing value, for numeric columns.
    pub min: Option<f64>,
    /// Maximum non-missing value, for numeric columns.
    pub max: Option<f64>,
    /// Number of missing (validity-bitmap null) entries.
    pub missing_count: usize,
    /// Number of distinct non-missing values.
    pub distinct_count: usize,
    /// A column is constant iff it holds exactly one distinct value and no
    /// missing entries. A single value plus missing entries still carries
    /// presence/absence information and is not constant.
    pub is_constant: bool,
}

impl ColumnProfile {
    /// Whether the column holds numeric values.
    pub fn is_numeric(&self) -> bool {
        self.kind.is_numeric()
    }
}

/// Exact numeric inputs for the downcast resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    /// Minimum present value. `NaN` when the column has present values but
    /// none of them are comparable (all `NaN`).
    pub min: f64,
    /// Maximum present value, same caveat as `min`.
    pub max: f64,
    /// No present value has a fractional component.
    pub integral: bool,
    /// Every present value round-trips exactly through `f32`.
    pub f32_lossless: bool,
    /// Number of present (non-missing) values.
    pub present_count: usize,
    /// Whether the column contains missing entries.
    pub has_missing: bool,
}

/// Canonical bit pattern for float distinctness and row hashing: all `NaN`s
/// collapse to one value and `-0.0` equals `0.0`.
pub(crate) fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn int_stats<T>(array: &arrow::array::PrimitiveArray<T>) -> NumericStats
where
    T: ArrowPrimitiveType,
    T::Native: Into<i64> + Copy,
{
    let mut min = i64::MAX;
    let mut max = i64::MIN;
    let mut present = 0usize;
    for value in array.iter().flatten() {
        let value: i64 = value.into();
        min = min.min(value);
        max = max.max(value);
        present += 1;
    }
    NumericStats {
        min: if present == 0 { f64::NAN } else { min as f64 },
        max: if present == 0 { f64::NAN } else { max as f64 },
        integral: true,
        f32_lossless: false,
        present_count: present,
        has_missing: array.null_count() > 0,
    }
}

fn uint64_stats(array: &arrow::array::PrimitiveArray<UInt64Type>) -> NumericStats {
    let mut min = u64::MAX;
    let mut max = u64::MIN;
    let mut present = 0usize;
    for value in array.iter().flatten() {
        min = min.min(value);
        max = max.max(value);
        present += 1;
    }
    NumericStats {
        min: if present == 0 { f64::NAN } else { min as f64 },
        max: if present == 0 { f64::NAN } else { max as f64 },
        integral: true,
        f32_lossless: false,
        present_count: present,
        has_missing: array.null_count() > 0,
    }
}

fn float_stats<T>(array: &arrow::array::PrimitiveArray<T>) -> NumericStats
where
    T: ArrowPrimitiveType,
    T::Native: Into<f64> + Copy,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut comparable = 0usize;
    let mut present = 0usize;
    let mut integral = true;
    let mut f32_lossless = true;
    for value in array.iter().flatten() {
        let value: f64 = value.into();
        present += 1;
        if value.fract() != 0.0 {
            integral = false;
        }
        if (value as f32) as f64 != value {
            f32_lossless = false;
        }
        if !value.is_nan() {
            comparable += 1;
            min = min.min(value);
            max = max.max(value);
        }
    }
    NumericStats {
        min: if comparable == 0 { f64::NAN } else { min },
        max: if comparable == 0 { f64::NAN } else { max },
        integral,
        f32_lossless,
        present_count: present,
        has_missing: array.null_count() > 0,
    }
}

/// Computes [`NumericStats`] for a numeric column.
///
/// Errors with [`ScourError::AllMissing`] when the column has no present
/// values, and [`ScourError::TypeMismatch`] when it is not numeric.
pub fn numeric_stats(name: &str, array: &ArrayRef) -> Result<NumericStats> {
    let stats = match array.data_type() {
        DataType::Int8 => int_stats(array.as_primitive::<Int8Type>()),
        DataType::Int16 => int_stats(array.as_primitive::<Int16Type>()),
        DataType::Int32 => int_stats(array.as_primitive::<Int32Type>()),
        DataType::Int64 => int_stats(array.as_primitive::<Int64Type>()),
        DataType::UInt8 => int_stats(array.as_primitive::<UInt8Type>()),
        DataType::UInt16 => int_stats(array.as_primitive::<UInt16Type>()),
        DataType::UInt32 => int_stats(array.as_primitive::<UInt32Type>()),
        DataType::UInt64 => uint64_stats(array.as_primitive::<UInt64Type>()),
        DataType::Float32 => float_stats(array.as_primitive::<Float32Type>()),
        DataType::Float64 => float_stats(array.as_primitive::<Float64Type>()),
        other => {
            return Err(ScourError::TypeMismatch {
                column: name.to_string(),
                expected: "a numeric storage type".to_string(),
                found: other.to_string(),
            })
        }
    };
    if stats.present_count == 0 {
        return Err(ScourError::AllMissing {
            column: name.to_string(),
        });
    }
    Ok(stats)
}

/// Collects a numeric column's comparable present values as `f64`, for the
/// outlier detector. Missing entries and `NaN` are excluded.
pub fn comparable_values(name: &str, array: &ArrayRef) -> Result<Vec<f64>> {
    macro_rules! collect {
        ($ty:ty) => {
            array
                .as_primitive::<$ty>()
                .iter()
                .flatten()
                .map(|v| v as f64)
                .collect()
        };
    }
    let values: Vec<f64> = match array.data_type() {
        DataType::Int8 => collect!(Int8Type),
        DataType::Int16 => collect!(Int16Type),
        DataType::Int32 => collect!(Int32Type),
        DataType::Int64 => collect!(Int64Type),
        DataType::UInt8 => collect!(UInt8Type),
        DataType::UInt16 => collect!(UInt16Type),
        DataType::UInt32 => collect!(UInt32Type),
        DataType::UInt64 => collect!(UInt64Type),
        DataType::Float32 => collect!(Float32Type),
        DataType::Float64 => collect!(Float64Type),
        other => {
            return Err(ScourError::TypeMismatch {
                column: name.to_string(),
                expected: "a numeric storage type".to_string(),
                found: other.to_string(),
            })
        }
    };
    Ok(values.into_iter().filter(|v| !v.is_nan()).collect())
}

fn distinct_ints<T>(array: &arrow::array::PrimitiveArray<T>) -> usize
where
    T: ArrowPrimitiveType,
    T::Native: Into<i64> + Copy,
{
    array
        .iter()
        .flatten()
        .map(Into::<i64>::into)
        .collect::<HashSet<_>>()
        .len()
}

fn distinct_floats<T>(array: &arrow::array::PrimitiveArray<T>) -> usize
where
    T: ArrowPrimitiveType,
    T::Native: Into<f64> + Copy,
{
    array
        .iter()
        .flatten()
        .map(|v| canonical_bits(v.into()))
        .collect::<HashSet<_>>()
        .len()
}

fn distinct_count(name: &str, array: &ArrayRef) -> Result<usize> {
    let count = match array.data_type() {
        DataType::Int8 => distinct_ints(array.as_primitive::<Int8Type>()),
        DataType::Int16 => distinct_ints(array.as_primitive::<Int16Type>()),
        DataType::Int32 => distinct_ints(array.as_primitive::<Int32Type>()),
        DataType::Int64 => distinct_ints(array.as_primitive::<Int64Type>()),
        DataType::UInt8 => distinct_ints(array.as_primitive::<UInt8Type>()),
        DataType::UInt16 => distinct_ints(array.as_primitive::<UInt16Type>()),
        DataType::UInt32 => distinct_ints(array.as_primitive::<UInt32Type>()),
        DataType::UInt64 => array
            .as_primitive::<UInt64Type>()
            .iter()
            .flatten()
            .collect::<HashSet<_>>()
            .len(),
        DataType::Float32 => distinct_floats(array.as_primitive::<Float32Type>()),
        DataType::Float64 => distinct_floats(array.as_primitive::<Float64Type>()),
        DataType::Utf8 => array
            .as_string::<i32>()
            .iter()
            .flatten()
            .collect::<HashSet<_>>()
            .len(),
        DataType::LargeUtf8 => array
            .as_string::<i64>()
            .iter()
            .flatten()
            .collect::<HashSet<_>>()
            .len(),
        DataType::Boolean => array
            .as_boolean()
            .iter()
            .flatten()
            .collect::<HashSet<_>>()
            .len(),
        DataType::Dictionary(key_type, value_type)
            if **key_type == DataType::Int32
                && matches!(**value_type, DataType::Utf8) =>
        {
            let dict = array.as_dictionary::<Int32Type>();
            let values = dict.values().as_string::<i32>();
            let mut seen = HashSet::new();
            for key in dict.keys().iter().flatten() {
                seen.insert(values.value(key as usize));
            }
            seen.len()
        }
        other => {
            return Err(ScourError::unsupported_type(name, other.to_string()));
        }
    };
    Ok(count)
}

/// Profiles one column: kind, range, missingness, cardinality, constancy.
///
/// Pure read; errors with [`ScourError::UnsupportedType`] for storage types
/// no analyzer supports, which callers isolate per column rather than
/// propagating to the whole report.
pub fn profile_column(name: &str, array: &ArrayRef) -> Result<ColumnProfile> {
    let kind = ColumnKind::from_data_type(array.data_type());
    if kind == ColumnKind::Other {
        return Err(ScourError::unsupported_type(
            name,
            array.data_type().to_string(),
        ));
    }

    let missing_count = array.null_count();
    let distinct = distinct_count(name, array)?;
    let (min, max) = if kind.is_numeric() {
        match numeric_stats(name, array) {
            Ok(stats) if !stats.min.is_nan() => (Some(stats.min), Some(stats.max)),
            _ => (None, None),
        }
    } else {
        (None, None)
    };

    Ok(ColumnProfile {
        name: name.to_string(),
        kind,
        min,
        max,
        missing_count,
        distinct_count: distinct,
        is_constant: distinct == 1 && missing_count == 0,
    })
}
