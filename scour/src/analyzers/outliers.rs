//! Quartile-fence outlier detection for numeric columns.
//!
//! Quartiles are computed by linear interpolation on the sorted present
//! values: the q-quantile sits at position `(n - 1) * q`, interpolating
//! between the two neighboring order statistics. Quartile conventions
//! (nearest-rank, median-of-medians) disagree at small n, so the method is
//! part of the contract and tested against fixed expected values.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::analyzers::round2;

/// Fence-based outlier summary for one numeric column.
///
/// Recomputed from the current snapshot on every call; fences shift after
/// cleaning, so cached bounds would lie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierBounds {
    /// Column the bounds belong to.
    pub column: String,
    /// `Q1 - 1.5 * IQR`.
    pub lower_fence: f64,
    /// `Q3 + 1.5 * IQR`.
    pub upper_fence: f64,
    /// Number of values strictly below the lower fence.
    pub count_below: usize,
    /// Number of values strictly above the upper fence.
    pub count_above: usize,
    /// Outliers as a percentage of the present values, rounded to two
    /// decimal places.
    pub percentage: f64,
}

impl OutlierBounds {
    /// Total outlier count.
    pub fn total(&self) -> usize {
        self.count_below + self.count_above
    }
}

/// Linear-interpolation quantile over sorted values.
///
/// `sorted` must be non-empty and ascending; `q` in `[0, 1]`.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * weight
    }
}

/// Computes fences and outlier counts over a column's present values.
///
/// Returns `None` for an empty slice (nothing to bound). An IQR of zero
/// collapses both fences onto the quartile point; everything outside that
/// single point then counts as an outlier.
pub fn detect_outliers(column: &str, values: &[f64]) -> Option<OutlierBounds> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let count_below = sorted.iter().filter(|&&v| v < lower_fence).count();
    let count_above = sorted.iter().filter(|&&v| v > upper_fence).count();
    let total = count_below + count_above;
    trace!(
        column,
        q1,
        q3,
        count_below,
        count_above,
        "computed outlier fences"
    );

    Some(OutlierBounds {
        column: column.to_string(),
        lower_fence,
        upper_fence,
        count_below,
        count_above,
        percentage: round2(total as f64 * 100.0 / sorted.len() as f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_fences() {
        // The pinned reference case: linear-interpolation quartiles.
        let values: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 100.0];
        let bounds = detect_outliers("v", &values).unwrap();
        assert_eq!(bounds.lower_fence, -3.5);
        assert_eq!(bounds.upper_fence, 14.5);
        assert_eq!(bounds.count_below, 0);
        assert_eq!(bounds.count_above, 1);
        assert_eq!(bounds.percentage, 10.0);
    }

    #[test]
    fn test_golden_quartiles() {
        let values: Vec<f64> = (1..=9).map(f64::from).chain([100.0]).collect();
        assert_eq!(quantile(&values, 0.25), 3.25);
        assert_eq!(quantile(&values, 0.75), 7.75);
    }

    #[test]
    fn test_quantile_exact_positions() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(quantile(&values, 0.0), 10.0);
        assert_eq!(quantile(&values, 0.5), 20.0);
        assert_eq!(quantile(&values, 1.0), 30.0);
    }

    #[test]
    fn test_zero_iqr_collapses_fences() {
        // Nine equal values and one stray: Q1 == Q3, fences collapse to the
        // single point, the stray counts as an outlier, and nothing panics.
        let mut values = vec![5.0; 9];
        values.push(6.0);
        let bounds = detect_outliers("v", &values).unwrap();
        assert_eq!(bounds.lower_fence, 5.0);
        assert_eq!(bounds.upper_fence, 5.0);
        assert_eq!(bounds.count_below, 0);
        assert_eq!(bounds.count_above, 1);
        assert_eq!(bounds.percentage, 10.0);
    }

    #[test]
    fn test_no_outliers_still_computed() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let bounds = detect_outliers("v", &values).unwrap();
        assert_eq!(bounds.total(), 0);
        assert_eq!(bounds.percentage, 0.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_outliers("v", &[]).is_none());
    }

    #[test]
    fn test_single_value() {
        let bounds = detect_outliers("v", &[42.0]).unwrap();
        assert_eq!(bounds.lower_fence, 42.0);
        assert_eq!(bounds.upper_fence, 42.0);
        assert_eq!(bounds.total(), 0);
    }

    #[test]
    fn test_percentage_rounding() {
        // 1 outlier over 6 values: 16.666...% rounds to 16.67.
        let bounds = detect_outliers("v", &[1.0, 1.0, 1.0, 1.0, 1.0, 100.0]).unwrap();
        assert_eq!(bounds.total(), 1);
        assert_eq!(bounds.percentage, 16.67);
    }
}
