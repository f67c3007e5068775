//! Narrowest-safe-type selection for numeric columns.
//!
//! The resolver consults a fixed-priority catalog of storage types and picks
//! the narrowest one that losslessly holds every present value of a column:
//! unsigned 8/16/32-bit, then signed 8/16/32-bit, then 32-bit float, with
//! 64-bit float as the fallback. Non-negative integral columns take the
//! unsigned family; integral columns with negative values take the signed
//! family; floating columns narrow to `Float32` only when every present
//! value round-trips exactly.
//!
//! Missing values never block an integer downcast here: the missing marker
//! lives in the column's validity bitmap, outside the value encoding, and
//! the resolver verifies that every candidate can carry the marker before
//! offering it. A plan that would corrupt or drop missing entries is never
//! emitted.
//!
//! The decision is a pure function of (min, max, integral, has-missing,
//! current type): identical inputs always yield identical output.

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analyzers::NumericStats;

/// A storage type the resolver may select, ordered from narrowest to widest
/// within each family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericTarget {
    UInt8,
    UInt16,
    UInt32,
    Int8,
    Int16,
    Int32,
    Float32,
    Float64,
}

/// Unsigned candidates, narrowest first.
const UNSIGNED: [NumericTarget; 3] = [
    NumericTarget::UInt8,
    NumericTarget::UInt16,
    NumericTarget::UInt32,
];

/// Signed candidates, narrowest first.
const SIGNED: [NumericTarget; 3] = [
    NumericTarget::Int8,
    NumericTarget::Int16,
    NumericTarget::Int32,
];

impl NumericTarget {
    /// The Arrow storage type this target maps to.
    pub fn data_type(&self) -> DataType {
        match self {
            NumericTarget::UInt8 => DataType::UInt8,
            NumericTarget::UInt16 => DataType::UInt16,
            NumericTarget::UInt32 => DataType::UInt32,
            NumericTarget::Int8 => DataType::Int8,
            NumericTarget::Int16 => DataType::Int16,
            NumericTarget::Int32 => DataType::Int32,
            NumericTarget::Float32 => DataType::Float32,
            NumericTarget::Float64 => DataType::Float64,
        }
    }

    /// Display name, matching Arrow's type naming.
    pub fn name(&self) -> &'static str {
        match self {
            NumericTarget::UInt8 => "UInt8",
            NumericTarget::UInt16 => "UInt16",
            NumericTarget::UInt32 => "UInt32",
            NumericTarget::Int8 => "Int8",
            NumericTarget::Int16 => "Int16",
            NumericTarget::Int32 => "Int32",
            NumericTarget::Float32 => "Float32",
            NumericTarget::Float64 => "Float64",
        }
    }

    /// Inclusive integer range, for the integer targets.
    fn integer_range(&self) -> Option<(i64, i64)> {
        match self {
            NumericTarget::UInt8 => Some((0, u8::MAX as i64)),
            NumericTarget::UInt16 => Some((0, u16::MAX as i64)),
            NumericTarget::UInt32 => Some((0, u32::MAX as i64)),
            NumericTarget::Int8 => Some((i8::MIN as i64, i8::MAX as i64)),
            NumericTarget::Int16 => Some((i16::MIN as i64, i16::MAX as i64)),
            NumericTarget::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            NumericTarget::Float32 | NumericTarget::Float64 => None,
        }
    }

    /// Whether this storage type can represent a missing marker alongside
    /// its full value range.
    ///
    /// Always true in this storage model: the marker lives in the validity
    /// bitmap, not in the value encoding. The check stays explicit so the
    /// representation-safety invariant is enforced where the decision is
    /// made, not assumed at a distance.
    pub fn supports_missing_marker(&self) -> bool {
        true
    }

    fn contains(&self, stats: &NumericStats) -> bool {
        match self.integer_range() {
            Some((lo, hi)) => stats.min >= lo as f64 && stats.max <= hi as f64,
            None => true,
        }
    }
}

/// Selects the narrowest storage type that losslessly holds a column's
/// observed values, or `None` when the current type is already minimal.
pub fn resolve_downcast(current: &DataType, stats: &NumericStats) -> Option<NumericTarget> {
    let current_is_float = matches!(current, DataType::Float32 | DataType::Float64);

    let mut candidate = if stats.integral {
        let family = if stats.min >= 0.0 { &UNSIGNED } else { &SIGNED };
        family.iter().copied().find(|t| t.contains(stats))
    } else {
        None
    };

    // Only float-typed storage may fall through to the float widths; an
    // integer column that fits no 32-bit type keeps its integer width.
    if candidate.is_none() && current_is_float {
        candidate = Some(if stats.f32_lossless {
            NumericTarget::Float32
        } else {
            NumericTarget::Float64
        });
    }
    let candidate = candidate?;

    if stats.has_missing && !candidate.supports_missing_marker() {
        return None;
    }
    if candidate.data_type() == *current {
        None
    } else {
        Some(candidate)
    }
}

/// One column's downcast recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowncastRecommendation {
    /// Column to convert.
    pub column: String,
    /// Current storage type name.
    pub current: String,
    /// Recommended narrower storage type.
    pub target: NumericTarget,
}

/// The full downcast plan for a dataset, consumed by optimize and discarded
/// after application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DowncastPlan {
    /// Recommendations in dataset column order.
    pub recommendations: Vec<DowncastRecommendation>,
}

impl DowncastPlan {
    /// Whether the plan recommends anything.
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }

    /// Columns grouped by target type name, for presentation.
    pub fn grouped_by_target(&self) -> BTreeMap<&'static str, Vec<&str>> {
        let mut groups: BTreeMap<&'static str, Vec<&str>> = BTreeMap::new();
        for rec in &self.recommendations {
            groups
                .entry(rec.target.name())
                .or_default()
                .push(rec.column.as_str());
        }
        groups
    }
}
