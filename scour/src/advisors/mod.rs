//! Storage-optimization advisors.
//!
//! Pure decision functions consumed by the transform engine: the downcast
//! resolver picks the narrowest lossless storage type for a numeric column,
//! and the categorical advisor decides whether a low-cardinality text column
//! should become dictionary-encoded. Neither mutates anything; the session
//! applies their plans.

pub mod categorical;
pub mod downcast;

pub use categorical::{advise_categorical, CategoricalPlan, CategoricalRecommendation};
pub use downcast::{resolve_downcast, DowncastPlan, DowncastRecommendation, NumericTarget};
