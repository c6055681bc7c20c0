//! The committed display snapshot and its persistence keys.

use asciiwx_text::measure;

use crate::store::StateStore;

/// Keys under which the display fields persist, one entry each. Writes are
/// independent per field; there is no cross-field transaction.
pub const KEY_CITY: &str = "city";
pub const KEY_TEMPERATURE: &str = "temperature";
pub const KEY_WIND: &str = "wind";
pub const KEY_HUMIDITY: &str = "humidity";
pub const KEY_UPDATED_AT: &str = "updated_at";

/// City marker shown while a refresh is acquiring a position.
pub const LOCATING_MARKER: &str = "LOCATING...";
/// City marker shown when location is denied or unavailable.
pub const DENIED_MARKER: &str = "LOCATION DENIED";

/// The five tokens shown on the panel, each already formatted for direct
/// placement into the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub city: String,
    pub temperature: String,
    pub wind: String,
    pub humidity: String,
    pub updated_at: String,
}

impl Default for DisplayState {
    /// The demo readout the screen ships with; shown until the first
    /// commit replaces it.
    fn default() -> Self {
        Self {
            city: "BERLIN".to_string(),
            temperature: "+03 C".to_string(),
            wind: "3 m/s".to_string(),
            humidity: "86%".to_string(),
            updated_at: "12:34".to_string(),
        }
    }
}

impl DisplayState {
    /// Loads the persisted snapshot field by field; a missing or unreadable
    /// field falls back to its own default independently of the others.
    pub fn load(store: &dyn StateStore) -> Self {
        let defaults = Self::default();
        Self {
            city: load_field(store, KEY_CITY, defaults.city),
            temperature: load_field(store, KEY_TEMPERATURE, defaults.temperature),
            wind: load_field(store, KEY_WIND, defaults.wind),
            humidity: load_field(store, KEY_HUMIDITY, defaults.humidity),
            updated_at: load_field(store, KEY_UPDATED_AT, defaults.updated_at),
        }
    }

    /// The transient frame shown while a refresh is locating. Never
    /// committed or persisted.
    pub fn locating() -> Self {
        Self {
            city: LOCATING_MARKER.to_string(),
            temperature: measure::TEMPERATURE_PLACEHOLDER.to_string(),
            wind: measure::WIND_PLACEHOLDER.to_string(),
            humidity: measure::HUMIDITY_PLACEHOLDER.to_string(),
            updated_at: measure::UPDATED_PLACEHOLDER.to_string(),
        }
    }

    /// A copy of this state with the city swapped for the denied marker.
    /// Rendered once after a location failure; never committed or
    /// persisted.
    pub fn with_denied_city(&self) -> Self {
        Self {
            city: DENIED_MARKER.to_string(),
            ..self.clone()
        }
    }
}

fn load_field(store: &dyn StateStore, key: &str, default: String) -> String {
    let value = store.get(key);
    if value.is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use crate::store::SqliteStore;

    #[test]
    fn defaults_match_the_shipped_screen() {
        let state = DisplayState::default();
        assert_eq!(state.city, "BERLIN");
        assert_eq!(state.temperature, "+03 C");
        assert_eq!(state.wind, "3 m/s");
        assert_eq!(state.humidity, "86%");
        assert_eq!(state.updated_at, "12:34");
    }

    #[test]
    fn load_falls_back_per_field() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set(KEY_CITY, "PARIS");
        store.set(KEY_TEMPERATURE, "+10 C");

        let state = DisplayState::load(&store);
        assert_eq!(state.city, "PARIS");
        assert_eq!(state.temperature, "+10 C");
        // Untouched fields keep their own defaults.
        assert_eq!(state.wind, "3 m/s");
        assert_eq!(state.humidity, "86%");
        assert_eq!(state.updated_at, "12:34");
    }

    #[test]
    fn locating_frame_uses_placeholders() {
        let state = DisplayState::locating();
        assert_eq!(state.city, LOCATING_MARKER);
        assert_eq!(state.temperature, "-- C");
        assert_eq!(state.wind, "-- m/s");
        assert_eq!(state.humidity, "--%");
        assert_eq!(state.updated_at, "--:--");
    }

    #[test]
    fn denied_copy_only_touches_the_city() {
        let committed = DisplayState {
            city: "LISBOA".to_string(),
            temperature: "+21 C".to_string(),
            ..DisplayState::default()
        };
        let denied = committed.with_denied_city();
        assert_eq!(denied.city, DENIED_MARKER);
        assert_eq!(denied.temperature, "+21 C");
        assert_eq!(denied.wind, committed.wind);
    }
}
