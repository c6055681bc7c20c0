//! Output seam for finished frames.

use asciiwx_grid::Grid;

/// Accepts finished frames for display.
///
/// Presentation is best-effort and synchronous; a sink that fails must
/// swallow the failure (log it, drop the frame) rather than surface it,
/// because the refresh pipeline treats rendering as infallible.
pub trait RenderSink: Send + Sync {
    fn present(&self, frame: &Grid);
}
