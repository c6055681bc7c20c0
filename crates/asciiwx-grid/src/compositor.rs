//! Assembly of content lines into a framed, fixed-size character block.

use std::fmt;

use crate::layout::pad_line;

/// Dimensions of the composed screen.
///
/// The full dimensions are declared independently of the content dimensions
/// rather than derived from them, so the final normalization pass holds the
/// output shape even if the frame arithmetic ever drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    /// Characters per content row, inside the frame.
    pub content_width: usize,
    /// Content rows, inside the frame.
    pub content_height: usize,
    /// Characters per row of the finished block.
    pub full_width: usize,
    /// Rows of the finished block.
    pub full_height: usize,
}

impl GridGeometry {
    /// The 48x28 content panel in a 50x30 frame used by the weather screen.
    pub const SCREEN: Self = Self {
        content_width: 48,
        content_height: 28,
        full_width: 50,
        full_height: 30,
    };
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::SCREEN
    }
}

/// A finished character block: exactly `full_height` rows of exactly
/// `full_width` characters each, no matter what was fed to the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    lines: Vec<String>,
    geometry: GridGeometry,
}

impl Grid {
    /// The rows of the block, top to bottom.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// A single row, if `row` is in range.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    /// The geometry this block was composed for.
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Composes arbitrary content lines into a framed [`Grid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GridCompositor {
    geometry: GridGeometry,
}

impl GridCompositor {
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    /// Builds the framed block from whatever content arrives.
    ///
    /// Content rows are truncated or padded to the content dimensions, then
    /// wrapped in a `+`/`-`/`|` border. The bordered result is normalized a
    /// second time against the full dimensions, which is a no-op when the
    /// frame arithmetic agrees with the geometry and a shape guarantee when
    /// it does not.
    pub fn compose<I, S>(&self, content: I) -> Grid
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let g = self.geometry;
        let rows = normalize(
            content.into_iter().map(|line| line.as_ref().to_string()),
            g.content_width,
            g.content_height,
        );

        let rule = format!("+{}+", "-".repeat(g.content_width));
        let mut framed = Vec::with_capacity(rows.len() + 2);
        framed.push(rule.clone());
        for row in rows {
            framed.push(format!("|{row}|"));
        }
        framed.push(rule);

        if framed.len() != g.full_height
            || framed.iter().any(|line| line.chars().count() != g.full_width)
        {
            tracing::debug!(
                rows = framed.len(),
                expected = g.full_height,
                "framed block off-geometry, renormalizing"
            );
        }
        let lines = normalize(framed.into_iter(), g.full_width, g.full_height);

        Grid { lines, geometry: g }
    }
}

/// Truncates or extends to exactly `height` rows, then pads or truncates
/// every row to exactly `width` characters.
fn normalize<I>(lines: I, width: usize, height: usize) -> Vec<String>
where
    I: Iterator<Item = String>,
{
    let mut rows: Vec<String> = lines
        .take(height)
        .map(|line| pad_line(&line, width))
        .collect();
    while rows.len() < height {
        rows.push(pad_line("", width));
    }
    rows
}
