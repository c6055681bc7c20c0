//! Pointer-to-cell mapping and control hit-testing.
//!
//! The panel is rendered as plain text, so a click carries no widget
//! identity. A hit is decided geometrically: the pixel position is divided
//! by the character-cell size to get a `(row, col)` cell, and the cell is
//! checked against the span of a control's literal label on its row.

use std::sync::OnceLock;

use crate::compositor::Grid;

/// Pixel size of one character cell on the rendered surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f64,
    pub height: f64,
}

impl CellMetrics {
    /// Metrics for surfaces that already address the grid in whole cells,
    /// such as terminal mouse reporting.
    pub const UNIT: Self = Self {
        width: 1.0,
        height: 1.0,
    };

    /// Whether these metrics can be divided by.
    pub fn is_usable(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Measures the character cell of the backing surface.
pub trait CellMetricsSource {
    /// One measurement attempt. `None` means the surface could not be
    /// measured.
    fn measure(&self) -> Option<CellMetrics>;
}

/// A source with a fixed answer, for cell-addressed surfaces and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedCellMetrics(pub CellMetrics);

impl CellMetricsSource for FixedCellMetrics {
    fn measure(&self) -> Option<CellMetrics> {
        Some(self.0)
    }
}

/// Caches the first measurement of a [`CellMetricsSource`] for the process
/// lifetime.
///
/// The underlying source is queried exactly once; whatever it reports,
/// including a failed measurement, is what every later call sees. Font or
/// zoom changes after that first measurement are not detected.
pub struct CachedCellMetrics<S> {
    source: S,
    cell: OnceLock<Option<CellMetrics>>,
}

impl<S: CellMetricsSource> CachedCellMetrics<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceLock::new(),
        }
    }

    /// The cached metrics, measuring on first use.
    pub fn get(&self) -> Option<CellMetrics> {
        *self.cell.get_or_init(|| self.source.measure())
    }
}

/// A labelled control on the composed screen.
///
/// `row` indexes into the framed block, and `label` is the literal text the
/// control shows there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub name: &'static str,
    pub row: usize,
    pub label: &'static str,
}

/// Maps a pixel position to a `(row, col)` grid cell.
///
/// Returns `None` for unusable metrics or negative coordinates.
pub fn cell_at(metrics: CellMetrics, x: f64, y: f64) -> Option<(usize, usize)> {
    if !metrics.is_usable() || !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / metrics.width).floor() as usize;
    let row = (y / metrics.height).floor() as usize;
    Some((row, col))
}

/// Whether a pixel position lands on `control` in the given frame.
///
/// The cell under the pointer must be on the control's row, and its column
/// must fall within the first occurrence of the control's label there. A
/// row outside the frame or a label missing from the row is no hit.
pub fn hit(frame: &Grid, control: &Control, metrics: CellMetrics, x: f64, y: f64) -> bool {
    let Some((row, col)) = cell_at(metrics, x, y) else {
        return false;
    };
    if row != control.row {
        return false;
    }
    let Some(line) = frame.line(row) else {
        return false;
    };
    let Some(byte_start) = line.find(control.label) else {
        return false;
    };
    let start = line[..byte_start].chars().count();
    let len = control.label.chars().count();
    col >= start && col < start + len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{GridCompositor, GridGeometry};

    const METRICS: CellMetrics = CellMetrics {
        width: 8.0,
        height: 16.0,
    };

    fn frame_with_refresh_row() -> Grid {
        // Rows 0..4 of content; the label lands on framed row 3.
        GridCompositor::new(GridGeometry {
            content_width: 20,
            content_height: 4,
            full_width: 22,
            full_height: 6,
        })
        .compose(["", "", "  [R] refresh", ""])
    }

    const REFRESH: Control = Control {
        name: "refresh",
        row: 3,
        label: "[R] refresh",
    };

    #[test]
    fn cell_division_truncates_toward_zero() {
        assert_eq!(cell_at(METRICS, 0.0, 0.0), Some((0, 0)));
        assert_eq!(cell_at(METRICS, 7.9, 15.9), Some((0, 0)));
        assert_eq!(cell_at(METRICS, 8.0, 16.0), Some((1, 1)));
        assert_eq!(cell_at(METRICS, 39.0, 100.0), Some((6, 4)));
    }

    #[test]
    fn cell_rejects_negative_and_degenerate_input() {
        assert_eq!(cell_at(METRICS, -1.0, 4.0), None);
        assert_eq!(cell_at(METRICS, 4.0, -0.1), None);
        let zero = CellMetrics {
            width: 0.0,
            height: 16.0,
        };
        assert_eq!(cell_at(zero, 4.0, 4.0), None);
        assert_eq!(cell_at(METRICS, f64::NAN, 4.0), None);
    }

    #[test]
    fn click_inside_label_span_hits() {
        let frame = frame_with_refresh_row();
        // Label starts at content col 2, framed col 3; row 3.
        let x = 3.0 * METRICS.width + 1.0;
        let y = 3.0 * METRICS.height + 1.0;
        assert!(hit(&frame, &REFRESH, METRICS, x, y));
        // Last label cell.
        let x_end = (3.0 + 10.0) * METRICS.width + 1.0;
        assert!(hit(&frame, &REFRESH, METRICS, x_end, y));
    }

    #[test]
    fn click_outside_label_span_misses() {
        let frame = frame_with_refresh_row();
        let y = 3.0 * METRICS.height + 1.0;
        // One cell left of the label.
        assert!(!hit(&frame, &REFRESH, METRICS, 2.0 * METRICS.width + 1.0, y));
        // One cell past the label.
        assert!(!hit(&frame, &REFRESH, METRICS, 14.0 * METRICS.width + 1.0, y));
    }

    #[test]
    fn click_on_wrong_row_misses() {
        let frame = frame_with_refresh_row();
        let x = 3.0 * METRICS.width + 1.0;
        assert!(!hit(&frame, &REFRESH, METRICS, x, 2.0 * METRICS.height + 1.0));
    }

    #[test]
    fn missing_label_misses() {
        let frame = GridCompositor::new(GridGeometry {
            content_width: 20,
            content_height: 4,
            full_width: 22,
            full_height: 6,
        })
        .compose(["", "", "", ""]);
        assert!(!hit(&frame, &REFRESH, METRICS, 30.0, 56.0));
    }

    #[test]
    fn row_outside_frame_misses() {
        let frame = frame_with_refresh_row();
        let below = Control {
            name: "below",
            row: 99,
            label: "[R] refresh",
        };
        let y = 99.0 * METRICS.height + 1.0;
        assert!(!hit(&frame, &below, METRICS, 30.0, y));
    }

    #[test]
    fn unit_metrics_address_cells_directly() {
        let frame = frame_with_refresh_row();
        assert!(hit(&frame, &REFRESH, CellMetrics::UNIT, 3.0, 3.0));
        assert!(!hit(&frame, &REFRESH, CellMetrics::UNIT, 14.0, 3.0));
    }

    #[test]
    fn cache_queries_the_source_once() {
        use std::cell::Cell;

        struct Counting<'a>(&'a Cell<usize>);
        impl CellMetricsSource for Counting<'_> {
            fn measure(&self) -> Option<CellMetrics> {
                self.0.set(self.0.get() + 1);
                Some(METRICS)
            }
        }

        let calls = Cell::new(0);
        let cached = CachedCellMetrics::new(Counting(&calls));
        assert_eq!(cached.get(), Some(METRICS));
        assert_eq!(cached.get(), Some(METRICS));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cache_keeps_a_failed_measurement() {
        struct Failing;
        impl CellMetricsSource for Failing {
            fn measure(&self) -> Option<CellMetrics> {
                None
            }
        }

        let cached = CachedCellMetrics::new(Failing);
        assert_eq!(cached.get(), None);
        assert_eq!(cached.get(), None);
    }
}
