//! Fixed-geometry character grid: line layout, frame composition and
//! pointer hit-testing for the weather panel.
//!
//! Everything in this crate is synchronous and total. Layout functions pad
//! or truncate instead of failing, and the compositor always emits a block
//! of exactly the declared dimensions regardless of input shape.

pub mod compositor;
pub mod hit;
pub mod layout;

pub use compositor::{Grid, GridCompositor, GridGeometry};
pub use hit::{
    cell_at, hit, CachedCellMetrics, CellMetrics, CellMetricsSource, Control, FixedCellMetrics,
};
pub use layout::{center, overlay, pad_line};
