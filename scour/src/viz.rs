//! Rendering port for missingness visualizations.
//!
//! Plotting is an external collaborator: the report calls through this
//! trait when asked to show a missingness matrix or heatmap, passes the
//! caller's opaque render options along verbatim, and never depends on the
//! renderer's output. The default implementation renders nothing.

use crate::core::options::OpaqueOptions;
use crate::core::report::MissingColumn;

/// Opaque options forwarded to a renderer without interpretation.
pub type RenderOptions = OpaqueOptions;

/// A sink for missing-value visualizations.
pub trait MissingnessRenderer {
    /// Renders a per-row missingness matrix for the given columns.
    fn render_matrix(&self, missing: &[MissingColumn], options: &RenderOptions);

    /// Renders a missingness correlation heatmap for the given columns.
    fn render_heatmap(&self, missing: &[MissingColumn], options: &RenderOptions);
}

/// Renderer that does nothing; the default collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

impl MissingnessRenderer for NoopRenderer {
    fn render_matrix(&self, _missing: &[MissingColumn], _options: &RenderOptions) {}

    fn render_heatmap(&self, _missing: &[MissingColumn], _options: &RenderOptions) {}
}
