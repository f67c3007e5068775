//! Dictionary-encoding recommendations for low-cardinality text columns.
//!
//! A text column is worth dictionary-encoding when its distinct-value count
//! is at most the configured threshold (inclusive) and greater than zero.
//! The distinct values are reported in first-seen order, which is stable and
//! reproducible across repeated calls on the same data.

use arrow::array::{ArrayRef, AsArray};
use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, ScourError};

/// One column's categorical-encoding recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalRecommendation {
    /// Column to convert.
    pub column: String,
    /// Distinct non-missing values, in first-seen order.
    pub distinct_values: Vec<String>,
}

/// The full categorical plan for a dataset, consumed by optimize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoricalPlan {
    /// Recommendations in dataset column order.
    pub recommendations: Vec<CategoricalRecommendation>,
}

impl CategoricalPlan {
    /// Whether the plan recommends anything.
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

fn distinct_first_seen<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for value in values.flatten() {
        if seen.insert(value) {
            ordered.push(value.to_string());
        }
    }
    ordered
}

/// Decides whether a text column should become dictionary-encoded.
///
/// `max_categories` is inclusive: a column with exactly that many distinct
/// values is recommended.
pub fn advise_categorical(
    column: &str,
    array: &ArrayRef,
    max_categories: usize,
) -> Result<Option<CategoricalRecommendation>> {
    let distinct = match array.data_type() {
        DataType::Utf8 => distinct_first_seen(array.as_string::<i32>().iter()),
        DataType::LargeUtf8 => distinct_first_seen(array.as_string::<i64>().iter()),
        other => {
            return Err(ScourError::TypeMismatch {
                column: column.to_string(),
                expected: "a text storage type".to_string(),
                found: other.to_string(),
            })
        }
    };
    if distinct.is_empty() || distinct.len() > max_categories {
        return Ok(None);
    }
    Ok(Some(CategoricalRecommendation {
        column: column.to_string(),
        distinct_values: distinct,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;
    use std::sync::Arc;

    fn text_col(values: Vec<Option<&str>>) -> ArrayRef {
        Arc::new(StringArray::from(values))
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let array = text_col(vec![Some("a"), Some("b"), Some("c")]);
        // Exactly at the threshold: recommended.
        assert!(advise_categorical("col", &array, 3).unwrap().is_some());
        // One above: not recommended.
        assert!(advise_categorical("col", &array, 2).unwrap().is_none());
    }

    #[test]
    fn test_first_seen_order() {
        let array = text_col(vec![
            Some("pear"),
            Some("apple"),
            None,
            Some("pear"),
            Some("banana"),
        ]);
        let rec = advise_categorical("fruit", &array, 10).unwrap().unwrap();
        assert_eq!(rec.distinct_values, vec!["pear", "apple", "banana"]);
    }

    #[test]
    fn test_all_missing_not_recommended() {
        let array = text_col(vec![None, None]);
        assert!(advise_categorical("col", &array, 5).unwrap().is_none());
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let array = text_col(vec![Some("x"), Some("y"), Some("x")]);
        let first = advise_categorical("col", &array, 5).unwrap();
        let second = advise_categorical("col", &array, 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_non_text() {
        let array: ArrayRef = Arc::new(arrow::array::Int64Array::from(vec![1, 2]));
        assert!(matches!(
            advise_categorical("col", &array, 5),
            Err(ScourError::TypeMismatch { .. })
        ));
    }
}
