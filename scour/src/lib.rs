//! # Scour - Data-Quality Inspection and Memory Optimization for Rust
//!
//! Scour inspects an in-memory tabular dataset and produces a diagnostic
//! report of data-quality issues together with two mutating operations -
//! cleaning and type optimization - that remove structurally useless data
//! and shrink the dataset's memory footprint. It is built on Arrow's
//! columnar model: columns are typed arrays with validity bitmaps, so
//! missing values stay representable at every storage width.
//!
//! ## Overview
//!
//! A [`core::ScourSession`] owns one dataset snapshot for its lifetime.
//! Construction drops constant (single-valued, fully present) columns once;
//! afterwards three operations are available, in any order:
//!
//! - **report** - a read-only [`core::QualityReport`] with five sections:
//!   duplicated rows, the numeric downcast plan, the categorical plan,
//!   outlier bounds, and the missing-value table.
//! - **clean** - drops columns whose missing ratio exceeds a threshold, then
//!   rows with missing values, then duplicate rows.
//! - **optimize** - narrows every numeric column to the narrowest lossless
//!   storage type and dictionary-encodes low-cardinality text columns.
//!
//! ## Quick Start
//!
//! ```rust
//! use arrow::array::{ArrayRef, Int64Array, StringArray};
//! use arrow::datatypes::{DataType, Field, Schema};
//! use arrow::record_batch::RecordBatch;
//! use scour::prelude::*;
//! use std::sync::Arc;
//!
//! # fn example() -> scour::error::Result<()> {
//! let batch = RecordBatch::try_new(
//!     Arc::new(Schema::new(vec![
//!         Field::new("age", DataType::Int64, true),
//!         Field::new("country", DataType::Utf8, true),
//!     ])),
//!     vec![
//!         Arc::new(Int64Array::from(vec![Some(34), Some(27), Some(27)])) as ArrayRef,
//!         Arc::new(StringArray::from(vec![Some("it"), Some("no"), Some("no")])) as ArrayRef,
//!     ],
//! )?;
//!
//! let mut session = ScourSession::new(batch, SessionConfig::default())?;
//!
//! let report = session.report(&ReportOptions::default())?;
//! println!("{}", HumanFormatter::new().format(&report)?);
//!
//! session.clean(&CleanOptions::default())?;
//! let optimized = session.optimize()?;
//! println!(
//!     "memory: {} -> {} bytes",
//!     optimized.bytes_before, optimized.bytes_after
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`dataset`**: the immutable snapshot model over an Arrow
//!   `RecordBatch`, plus the transform primitives (column drops, row
//!   filters, lossless casts).
//! - **`analyzers`**: pure per-column and per-row statistics - the column
//!   profiler, the quartile-fence outlier detector, and duplicate/constant
//!   detection.
//! - **`advisors`**: pure decision functions - the downcast resolver's
//!   fixed-priority type catalog and the categorical advisor.
//! - **`core`**: configuration, the report builder, and the owning session.
//! - **`viz`**: the injected rendering port for missingness visualizations.
//! - **`formatters`**: human-readable and JSON report rendering.
//!
//! Everything is synchronous and single-threaded: each operation is a small
//! number of linear passes over fully resident data, and each mutation
//! swaps in a complete new snapshot or leaves the old one untouched.

pub mod advisors;
pub mod analyzers;
pub mod core;
pub mod dataset;
pub mod error;
pub mod formatters;
pub mod logging;
pub mod prelude;
pub mod viz;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
