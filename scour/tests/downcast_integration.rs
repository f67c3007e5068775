//! Downcast safety: after optimize, every present value must be exactly
//! recoverable from the new storage width, and missing markers must
//! survive, for boundary values at each catalog type's limits.

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use scour::core::{ScourSession, SessionConfig};
use scour::test_utils::{batch_of, float_array, int_array};

/// Optimizes a single Int64 column and asserts the expected target type and
/// an exact value round trip.
fn assert_int_roundtrip(values: Vec<Option<i64>>, expected: DataType) {
    let batch = batch_of(vec![("v", int_array(values.clone()))]);
    let mut session = ScourSession::new(batch, SessionConfig::default()).unwrap();
    session.optimize().unwrap();

    let array = session.dataset().column("v").unwrap();
    assert_eq!(array.data_type(), &expected, "values {values:?}");

    // Widen back to Int64 and compare element-wise, marker included.
    let widened = cast(&array, &DataType::Int64).unwrap();
    let widened = widened.as_primitive::<Int64Type>();
    assert_eq!(widened.len(), values.len());
    for (row, original) in values.iter().enumerate() {
        match original {
            Some(v) => assert_eq!(widened.value(row), *v, "row {row}"),
            None => assert!(widened.is_null(row), "row {row} lost its marker"),
        }
    }
}

#[test]
fn uint8_boundaries_roundtrip() {
    assert_int_roundtrip(vec![Some(0), Some(255), Some(17)], DataType::UInt8);
}

#[test]
fn uint16_boundaries_roundtrip() {
    assert_int_roundtrip(vec![Some(0), Some(256)], DataType::UInt16);
    assert_int_roundtrip(vec![Some(0), Some(65535)], DataType::UInt16);
}

#[test]
fn uint32_boundaries_roundtrip() {
    assert_int_roundtrip(vec![Some(0), Some(65536)], DataType::UInt32);
    assert_int_roundtrip(vec![Some(0), Some(4294967295)], DataType::UInt32);
}

#[test]
fn int8_boundaries_roundtrip() {
    assert_int_roundtrip(vec![Some(-128), Some(127)], DataType::Int8);
}

#[test]
fn int16_boundaries_roundtrip() {
    assert_int_roundtrip(vec![Some(-129), Some(5)], DataType::Int16);
    assert_int_roundtrip(vec![Some(-32768), Some(32767)], DataType::Int16);
}

#[test]
fn int32_boundaries_roundtrip() {
    assert_int_roundtrip(vec![Some(-32769), Some(9)], DataType::Int32);
    assert_int_roundtrip(
        vec![Some(-2147483648), Some(2147483647)],
        DataType::Int32,
    );
}

#[test]
fn out_of_catalog_range_keeps_original_width() {
    assert_int_roundtrip(vec![Some(0), Some(4294967296)], DataType::Int64);
    assert_int_roundtrip(vec![Some(-2147483649), Some(0)], DataType::Int64);
}

#[test]
fn missing_markers_survive_integer_narrowing() {
    // {0, 1, missing}: the chosen type holds 0, 1 and the marker.
    assert_int_roundtrip(vec![Some(0), Some(1), None], DataType::UInt8);
    assert_int_roundtrip(vec![Some(-5), None, Some(1000)], DataType::Int16);
}

#[test]
fn integral_floats_narrow_to_integers_with_markers_intact() {
    let values = vec![Some(0.0), Some(200.0), None];
    let batch = batch_of(vec![("v", float_array(values))]);
    let mut session = ScourSession::new(batch, SessionConfig::default()).unwrap();
    session.optimize().unwrap();

    let array = session.dataset().column("v").unwrap();
    assert_eq!(array.data_type(), &DataType::UInt8);
    let widened = cast(&array, &DataType::Float64).unwrap();
    let widened = widened.as_primitive::<Float64Type>();
    assert_eq!(widened.value(0), 0.0);
    assert_eq!(widened.value(1), 200.0);
    assert!(widened.is_null(2));
}

#[test]
fn exact_fractions_narrow_to_float32() {
    // 1.5 and -2.25 are exactly representable in f32.
    let values = vec![Some(1.5), Some(-2.25), None];
    let batch = batch_of(vec![("v", float_array(values.clone()))]);
    let mut session = ScourSession::new(batch, SessionConfig::default()).unwrap();
    session.optimize().unwrap();

    let array = session.dataset().column("v").unwrap();
    assert_eq!(array.data_type(), &DataType::Float32);
    let widened = cast(&array, &DataType::Float64).unwrap();
    let widened = widened.as_primitive::<Float64Type>();
    for (row, original) in values.iter().enumerate() {
        match original {
            Some(v) => assert_eq!(widened.value(row), *v, "row {row}"),
            None => assert!(widened.is_null(row)),
        }
    }
}

#[test]
fn inexact_fractions_keep_float64() {
    let batch = batch_of(vec![("v", float_array(vec![Some(0.1), Some(0.2)]))]);
    let mut session = ScourSession::new(batch, SessionConfig::default()).unwrap();
    let summary = session.optimize().unwrap();
    assert!(summary.is_noop());
    assert_eq!(
        session.dataset().data_type_of("v").unwrap(),
        DataType::Float64
    );
}

#[test]
fn optimize_reports_no_change_for_minimal_columns() {
    // One column already minimal, one narrowable: only the latter appears.
    let batch = batch_of(vec![
        ("big", int_array(vec![Some(0), Some(1_000_000_000_000)])),
        ("small", int_array(vec![Some(0), Some(7)])),
    ]);
    let mut session = ScourSession::new(batch, SessionConfig::default()).unwrap();
    let summary = session.optimize().unwrap();
    let converted: Vec<&str> = summary
        .downcasts
        .iter()
        .map(|c| c.column.as_str())
        .collect();
    assert_eq!(converted, vec!["small"]);
}
