use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Geographic position of the device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Options for a single location acquisition attempt.
#[derive(Debug, Clone, Copy)]
pub struct LocationOptions {
    /// Ask the platform for its most precise fix.
    pub high_accuracy: bool,
    /// Provider-internal deadline for one attempt. Unrelated to the refresh
    /// watchdog, which bounds the whole pipeline.
    pub timeout: Duration,
    /// A cached fix no older than this may be returned without a fresh
    /// acquisition.
    pub max_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: false,
            timeout: Duration::from_secs(10),
            max_age: Duration::from_secs(300),
        }
    }
}

/// Current conditions snapshot: the subset of a provider response the
/// panel displays.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Metres per second.
    pub wind_speed: f64,
    /// Relative humidity percentage.
    pub humidity: f64,
    /// Provider observation timestamp, unparsed; formatting happens at
    /// display time.
    pub observed_at: String,
}

/// Location service errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    ServiceUnavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Lookup failures shared by the place and weather services.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Server returned status {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Malformed(String),
}
