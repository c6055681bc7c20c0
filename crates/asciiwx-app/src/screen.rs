//! The weather screen template.
//!
//! Static art and rules live at fixed rows; the five display tokens are
//! overlaid at fixed columns. Rows index the 48x28 content panel, while
//! [`REFRESH_CONTROL`] addresses the framed block the compositor emits
//! (one row lower, one column right).

use asciiwx_grid::{center, overlay, Control, GridGeometry};

use crate::state::DisplayState;

const GEOMETRY: GridGeometry = GridGeometry::SCREEN;

/// Content row of the temperature readout.
pub const TEMP_ROW: usize = 13;
/// Content row of the city readout.
pub const CITY_ROW: usize = 15;
/// Content row of the updated/wind/humidity status line.
pub const STATUS_ROW: usize = 18;
/// Content row of the key help line.
pub const CONTROLS_ROW: usize = 20;

/// Column where the TEMP/CITY readouts start.
const INFO_COL: usize = 17;
/// Column where the status, controls and tip lines start.
const EDGE_COL: usize = 2;

const TITLE: &str = "ASCII WEATHER";
const TIP: &str = "tip: press R to refresh, Q to quit";

const CLOUD: [&str; 3] = [
    "                 .--.",
    "              .-(    ).",
    "             (___.__)__)",
];

const RAIN: [&str; 2] = [
    "            _-_-_-_-_-_-_-_-_-_-_-_-_",
    "             _-_-_-_-_-_-_-_-_-_-_-_-_",
];

/// The clickable refresh control, addressed in framed coordinates.
pub const REFRESH_CONTROL: Control = Control {
    name: "refresh",
    row: CONTROLS_ROW + 1,
    label: "[R] refresh",
};

/// Builds the 28 content rows for a display state.
///
/// Every row comes out at the content width; the compositor's own
/// normalization would repair anything shorter or longer anyway.
pub fn content_lines(state: &DisplayState) -> Vec<String> {
    let w = GEOMETRY.content_width;
    let rule = "-".repeat(w);
    let blank = "";

    let mut rows = vec![" ".repeat(w); GEOMETRY.content_height];
    rows[0] = center(TITLE, w);
    rows[1] = rule.clone();
    rows[3] = overlay(blank, CLOUD[0], 0, w);
    rows[4] = overlay(blank, CLOUD[1], 0, w);
    rows[5] = overlay(blank, CLOUD[2], 0, w);
    rows[7] = overlay(blank, RAIN[0], 0, w);
    rows[8] = overlay(blank, RAIN[1], 0, w);
    rows[9] = overlay(blank, RAIN[0], 0, w);
    rows[10] = overlay(blank, RAIN[1], 0, w);
    rows[TEMP_ROW] = overlay(blank, &format!("TEMP:  {}", state.temperature), INFO_COL, w);
    rows[CITY_ROW] = overlay(blank, &format!("CITY:  {}", state.city), INFO_COL, w);
    rows[17] = rule.clone();
    rows[STATUS_ROW] = overlay(
        blank,
        &format!(
            "updated: {}   wind: {}   hum: {}",
            state.updated_at, state.wind, state.humidity
        ),
        EDGE_COL,
        w,
    );
    rows[19] = rule;
    rows[CONTROLS_ROW] = overlay(
        blank,
        "[R] refresh     [L] location     [A] about",
        EDGE_COL,
        w,
    );
    rows[22] = overlay(blank, TIP, EDGE_COL, w);
    rows
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use asciiwx_grid::GridCompositor;

    #[test]
    fn template_fills_the_content_panel() {
        let rows = content_lines(&DisplayState::default());
        assert_eq!(rows.len(), 28);
        for row in &rows {
            assert_eq!(row.chars().count(), 48);
        }
    }

    #[test]
    fn default_state_reproduces_the_shipped_screen() {
        let rows = content_lines(&DisplayState::default());
        assert_eq!(rows[0], "                 ASCII WEATHER                  ");
        assert_eq!(
            rows[TEMP_ROW],
            "                 TEMP:  +03 C                   "
        );
        assert_eq!(
            rows[CITY_ROW],
            "                 CITY:  BERLIN                  "
        );
        assert_eq!(
            rows[STATUS_ROW],
            "  updated: 12:34   wind: 3 m/s   hum: 86%       "
        );
        assert_eq!(
            rows[CONTROLS_ROW],
            "  [R] refresh     [L] location     [A] about    "
        );
    }

    #[test]
    fn long_tokens_are_cut_at_the_panel_edge() {
        let state = DisplayState {
            city: "X".repeat(80),
            ..DisplayState::default()
        };
        let rows = content_lines(&state);
        assert_eq!(rows[CITY_ROW].chars().count(), 48);
        assert!(rows[CITY_ROW].ends_with('X'));
    }

    #[test]
    fn refresh_control_sits_on_its_framed_row() {
        let frame = GridCompositor::default().compose(content_lines(&DisplayState::default()));
        let line = frame.line(REFRESH_CONTROL.row).unwrap();
        assert!(line.contains(REFRESH_CONTROL.label));
        // Framed coordinates: content col 2 plus the left border.
        assert_eq!(line.find("[R]"), Some(3));
    }
}
