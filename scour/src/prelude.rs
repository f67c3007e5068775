//! Prelude for commonly used types in scour.

pub use crate::core::{
    CleanOptions, CleanSummary, OptimizeSummary, QualityReport, ReportOptions, ScourSession,
    SessionConfig,
};
pub use crate::error::{Result, ScourError};
pub use crate::formatters::{HumanFormatter, JsonFormatter, ReportFormatter};
pub use crate::logging::LogConfig;
pub use crate::viz::{MissingnessRenderer, NoopRenderer};
