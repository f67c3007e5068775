//! Column-major dataset model backed by Arrow.
//!
//! A [`Dataset`] is an immutable snapshot of a tabular dataset: an ordered
//! sequence of named, uniformly typed, row-aligned columns wrapped around an
//! Arrow [`RecordBatch`]. Mutation happens only through the transform
//! primitives in [`transform`], each of which builds a complete new
//! `RecordBatch` before the caller swaps it in, so an interrupted operation
//! can never leave a partially transformed snapshot behind.
//!
//! Missing values are Arrow validity-bitmap nulls. The bitmap is decoupled
//! from the value encoding, which is what allows the downcast engine to
//! narrow a column to a small integer type without sacrificing an in-band
//! sentinel value for "no value present".

pub mod transform;

use arrow::array::{Array, ArrayRef};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScourError};

/// The semantic kind of a column, derived from its Arrow storage type.
///
/// Detection is type-based, never a heuristic over rendered values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Fixed-width integer storage (signed or unsigned).
    Integer,
    /// Floating-point storage.
    Float,
    /// Plain text storage.
    Text,
    /// Dictionary-encoded text (the result of a categorical conversion).
    Categorical,
    /// Boolean storage; participates in missing/duplicate/constant analysis
    /// only.
    Boolean,
    /// Any storage type the analyzers do not support.
    Other,
}

impl ColumnKind {
    /// Classifies an Arrow data type.
    pub fn from_data_type(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ColumnKind::Integer,
            DataType::Float32 | DataType::Float64 => ColumnKind::Float,
            DataType::Utf8 | DataType::LargeUtf8 => ColumnKind::Text,
            DataType::Dictionary(_, value_type) => match value_type.as_ref() {
                DataType::Utf8 | DataType::LargeUtf8 => ColumnKind::Categorical,
                _ => ColumnKind::Other,
            },
            DataType::Boolean => ColumnKind::Boolean,
            _ => ColumnKind::Other,
        }
    }

    /// Whether this kind carries numeric values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

/// An immutable snapshot of a tabular dataset.
///
/// Owned exclusively by the session that created it; every transform
/// operation yields a new snapshot while preserving row alignment across the
/// remaining columns and rows.
#[derive(Debug, Clone)]
pub struct Dataset {
    batch: RecordBatch,
}

impl Dataset {
    /// Wraps a `RecordBatch`, rejecting empty shapes.
    ///
    /// A dataset with zero rows or zero columns has undefined statistics
    /// (quartiles, value ranges), so it is surfaced as an error rather than
    /// silently tolerated.
    pub fn try_new(batch: RecordBatch) -> Result<Self> {
        if batch.num_rows() == 0 || batch.num_columns() == 0 {
            return Err(ScourError::EmptyDataset {
                rows: batch.num_rows(),
                columns: batch.num_columns(),
            });
        }
        Ok(Self { batch })
    }

    /// The number of rows.
    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    /// The number of columns.
    pub fn column_count(&self) -> usize {
        self.batch.num_columns()
    }

    /// Column names in dataset order.
    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    /// The position of a named column.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.batch
            .schema()
            .index_of(name)
            .map_err(|_| ScourError::column_not_found(name))
    }

    /// The values of a named column.
    pub fn column(&self, name: &str) -> Result<ArrayRef> {
        let index = self.index_of(name)?;
        Ok(self.batch.column(index).clone())
    }

    /// The values of the column at `index`.
    pub fn column_at(&self, index: usize) -> &ArrayRef {
        self.batch.column(index)
    }

    /// The storage type of a named column.
    pub fn data_type_of(&self, name: &str) -> Result<DataType> {
        let index = self.index_of(name)?;
        Ok(self.batch.schema().field(index).data_type().clone())
    }

    /// The semantic kind of a named column.
    pub fn kind_of(&self, name: &str) -> Result<ColumnKind> {
        Ok(ColumnKind::from_data_type(&self.data_type_of(name)?))
    }

    /// The underlying `RecordBatch`.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Total Arrow buffer memory held by all columns, in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.batch
            .columns()
            .iter()
            .map(|c| c.get_array_memory_size())
            .sum()
    }

    /// Renders one cell for display; missing cells render as `null`.
    pub fn render_cell(&self, column_index: usize, row: usize) -> String {
        let array = self.batch.column(column_index);
        if array.is_null(row) {
            return "null".to_string();
        }
        array_value_to_string(array, row).unwrap_or_else(|_| "?".to_string())
    }

    /// Renders one row for display, one string per column.
    pub fn render_row(&self, row: usize) -> Vec<String> {
        (0..self.column_count())
            .map(|col| self.render_cell(col, row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use std::sync::Arc;

    fn sample_batch() -> RecordBatch {
        RecordBatch::try_new(
            Arc::new(Schema::new(vec![
                Field::new("id", DataType::Int64, true),
                Field::new("value", DataType::Float64, true),
                Field::new("name", DataType::Utf8, true),
            ])),
            vec![
                Arc::new(Int64Array::from(vec![Some(1), Some(2), None])) as ArrayRef,
                Arc::new(Float64Array::from(vec![Some(1.5), None, Some(3.0)])) as ArrayRef,
                Arc::new(StringArray::from(vec![Some("a"), Some("b"), Some("a")])) as ArrayRef,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_empty_batch() {
        let batch = RecordBatch::try_new(
            Arc::new(Schema::new(vec![Field::new("x", DataType::Int64, true)])),
            vec![Arc::new(Int64Array::from(Vec::<i64>::new())) as ArrayRef],
        )
        .unwrap();
        assert!(matches!(
            Dataset::try_new(batch),
            Err(ScourError::EmptyDataset { rows: 0, .. })
        ));
    }

    #[test]
    fn test_column_kinds() {
        let ds = Dataset::try_new(sample_batch()).unwrap();
        assert_eq!(ds.kind_of("id").unwrap(), ColumnKind::Integer);
        assert_eq!(ds.kind_of("value").unwrap(), ColumnKind::Float);
        assert_eq!(ds.kind_of("name").unwrap(), ColumnKind::Text);
        assert!(ds.kind_of("id").unwrap().is_numeric());
        assert!(!ds.kind_of("name").unwrap().is_numeric());
    }

    #[test]
    fn test_dictionary_kind_is_categorical() {
        let dict_type =
            DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8));
        assert_eq!(
            ColumnKind::from_data_type(&dict_type),
            ColumnKind::Categorical
        );
    }

    #[test]
    fn test_column_not_found() {
        let ds = Dataset::try_new(sample_batch()).unwrap();
        assert!(matches!(
            ds.column("missing"),
            Err(ScourError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_render_row() {
        let ds = Dataset::try_new(sample_batch()).unwrap();
        assert_eq!(ds.render_row(1), vec!["2", "null", "b"]);
    }
}
