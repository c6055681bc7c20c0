//! Fixed-width tokens for the measurement fields.
//!
//! Each formatter is total and independent: non-finite or unparseable
//! input falls back to that field's placeholder so a bad reading can never
//! break the screen shape.

use chrono::{DateTime, Local, NaiveDateTime};

/// Shown while no temperature has been committed.
pub const TEMPERATURE_PLACEHOLDER: &str = "-- C";
/// Shown while no wind speed has been committed.
pub const WIND_PLACEHOLDER: &str = "-- m/s";
/// Shown while no humidity has been committed.
pub const HUMIDITY_PLACEHOLDER: &str = "--%";
/// Shown while no update time has been committed.
pub const UPDATED_PLACEHOLDER: &str = "--:--";

/// Formats a Celsius reading as `+NN C` / `-NN C`.
///
/// The sign is always present, the magnitude is zero-padded to two digits,
/// and rounding is half away from zero. Values that round to zero come out
/// positive, so `-0.4` is `+00 C`.
pub fn temperature(celsius: f64) -> String {
    if !celsius.is_finite() {
        return TEMPERATURE_PLACEHOLDER.to_string();
    }
    let rounded = celsius.round();
    let sign = if rounded < 0.0 { '-' } else { '+' };
    let magnitude = rounded.abs() as i64;
    format!("{sign}{magnitude:02} C")
}

/// Formats a wind speed in metres per second, rounded to an integer.
pub fn wind_speed(metres_per_second: f64) -> String {
    if !metres_per_second.is_finite() {
        return WIND_PLACEHOLDER.to_string();
    }
    format!("{} m/s", metres_per_second.round() as i64)
}

/// Formats a relative humidity, rounded and clamped to `0..=100`, as a
/// zero-padded percentage.
pub fn humidity(percent: f64) -> String {
    if !percent.is_finite() {
        return HUMIDITY_PLACEHOLDER.to_string();
    }
    let clamped = (percent.round() as i64).clamp(0, 100);
    format!("{clamped:02}%")
}

/// Formats an observation timestamp as local wall-clock `HH:MM`.
///
/// Accepts RFC 3339 as well as the zone-less minute- or second-precision
/// forms weather providers return for "local" timestamps. Anything else is
/// the placeholder.
pub fn updated_at(raw: &str) -> String {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return stamp.with_timezone(&Local).format("%H:%M").to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format("%H:%M").to_string();
        }
    }
    UPDATED_PLACEHOLDER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_rounds_half_away_from_zero() {
        assert_eq!(temperature(3.4), "+03 C");
        assert_eq!(temperature(3.5), "+04 C");
        assert_eq!(temperature(-0.6), "-01 C");
        assert_eq!(temperature(-0.5), "-01 C");
    }

    #[test]
    fn temperature_zero_is_positive() {
        assert_eq!(temperature(0.0), "+00 C");
        assert_eq!(temperature(-0.4), "+00 C");
    }

    #[test]
    fn temperature_pads_to_two_digits() {
        assert_eq!(temperature(7.0), "+07 C");
        assert_eq!(temperature(-21.7), "-22 C");
        assert_eq!(temperature(104.0), "+104 C");
    }

    #[test]
    fn temperature_placeholder_on_non_finite() {
        assert_eq!(temperature(f64::NAN), TEMPERATURE_PLACEHOLDER);
        assert_eq!(temperature(f64::INFINITY), TEMPERATURE_PLACEHOLDER);
        assert_eq!(temperature(f64::NEG_INFINITY), TEMPERATURE_PLACEHOLDER);
    }

    #[test]
    fn wind_speed_rounds_to_integer() {
        assert_eq!(wind_speed(3.4), "3 m/s");
        assert_eq!(wind_speed(3.5), "4 m/s");
        assert_eq!(wind_speed(0.0), "0 m/s");
    }

    #[test]
    fn wind_speed_placeholder_on_non_finite() {
        assert_eq!(wind_speed(f64::NAN), WIND_PLACEHOLDER);
    }

    #[test]
    fn humidity_rounds_and_pads() {
        assert_eq!(humidity(86.0), "86%");
        assert_eq!(humidity(85.5), "86%");
        assert_eq!(humidity(7.0), "07%");
        assert_eq!(humidity(0.0), "00%");
    }

    #[test]
    fn humidity_clamps_out_of_range() {
        assert_eq!(humidity(150.0), "100%");
        assert_eq!(humidity(-5.0), "00%");
    }

    #[test]
    fn humidity_placeholder_on_non_finite() {
        assert_eq!(humidity(f64::NAN), HUMIDITY_PLACEHOLDER);
    }

    #[test]
    fn updated_at_formats_zoneless_stamps() {
        assert_eq!(updated_at("2024-05-01T12:34"), "12:34");
        assert_eq!(updated_at("2024-05-01T09:05:59"), "09:05");
        assert_eq!(updated_at("2024-05-01T00:07"), "00:07");
    }

    #[test]
    fn updated_at_accepts_rfc3339() {
        // Local-time rendering depends on the host zone; check shape only.
        let token = updated_at("2024-05-01T12:34:00+02:00");
        assert_eq!(token.len(), 5);
        assert_eq!(token.as_bytes()[2], b':');
        assert!(token != UPDATED_PLACEHOLDER);
    }

    #[test]
    fn updated_at_placeholder_on_garbage() {
        assert_eq!(updated_at(""), UPDATED_PLACEHOLDER);
        assert_eq!(updated_at("noon"), UPDATED_PLACEHOLDER);
        assert_eq!(updated_at("2024-13-99T99:99"), UPDATED_PLACEHOLDER);
    }
}
