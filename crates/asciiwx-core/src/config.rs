use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Fixed position used for every refresh
    #[serde(default)]
    pub location: LocationConfig,

    /// Refresh timing
    #[serde(default)]
    pub refresh: RefreshConfig,
}

/// The position the panel reports weather for.
///
/// Headless hosts have no geolocation service, so the position is pinned
/// here. Leaving both fields unset makes every refresh show the denied
/// marker instead of weather.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct LocationConfig {
    /// Latitude in decimal degrees, -90 to 90
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees, -180 to 180
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Automatic refresh interval in minutes; 0 disables it
    #[serde(default = "default_auto_minutes")]
    pub auto_minutes: u32,

    /// Seconds before a hung refresh is abandoned
    #[serde(default = "default_watchdog_secs")]
    pub watchdog_secs: u64,
}

fn default_auto_minutes() -> u32 {
    15
}

fn default_watchdog_secs() -> u64 {
    12
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            auto_minutes: default_auto_minutes(),
            watchdog_secs: default_watchdog_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("asciiwx");

        Self {
            config_dir,
            location: LocationConfig::default(),
            refresh: RefreshConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Each check reports independently so one bad field never hides
        // another.
        if let Some(lat) = self.location.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                result.add_error("location.latitude", "Latitude must be between -90 and 90");
            }
        }
        if let Some(lon) = self.location.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                result.add_error(
                    "location.longitude",
                    "Longitude must be between -180 and 180",
                );
            }
        }
        match (self.location.latitude, self.location.longitude) {
            (Some(_), None) => {
                result.add_error("location.longitude", "Latitude set without longitude");
            }
            (None, Some(_)) => {
                result.add_error("location.latitude", "Longitude set without latitude");
            }
            (None, None) => {
                result.add_warning(
                    "location",
                    "No coordinates configured - refreshes will show the denied marker",
                );
            }
            _ => {}
        }

        if self.refresh.auto_minutes == 0 {
            result.add_warning("refresh.auto_minutes", "Automatic refresh disabled (0 minutes)");
        } else if self.refresh.auto_minutes > 1440 {
            result.add_warning(
                "refresh.auto_minutes",
                "Refresh interval is more than 24 hours",
            );
        }

        if self.refresh.watchdog_secs == 0 {
            result.add_error(
                "refresh.watchdog_secs",
                "Watchdog timeout must be greater than 0",
            );
        } else if self.refresh.watchdog_secs > 120 {
            result.add_warning(
                "refresh.watchdog_secs",
                "Watchdog timeout is unusually long (>120s)",
            );
        }

        result
    }

    /// The configured position as a pair, when both halves are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("asciiwx");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn with_coordinates(lat: f64, lon: f64) -> Config {
        let mut config = Config::default();
        config.location.latitude = Some(lat);
        config.location.longitude = Some(lon);
        config
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_missing_coordinates_is_a_warning() {
        let config = Config::default();
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "location"));
    }

    #[test]
    fn test_coordinates_in_range_are_accepted() {
        let result = with_coordinates(52.52, 13.405).validate();
        assert!(result.is_valid());
        assert!(!result.warnings.iter().any(|w| w.field == "location"));
    }

    #[test]
    fn test_out_of_range_latitude() {
        let result = with_coordinates(91.0, 13.405).validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "location.latitude"));
    }

    #[test]
    fn test_out_of_range_longitude() {
        let result = with_coordinates(52.52, -200.0).validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "location.longitude"));
    }

    #[test]
    fn test_both_out_of_range_coordinates_report_both_errors() {
        let result = with_coordinates(91.0, -200.0).validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "location.latitude"));
        assert!(result.errors.iter().any(|e| e.field == "location.longitude"));
    }

    #[test]
    fn test_half_configured_position_is_an_error() {
        let mut config = Config::default();
        config.location.latitude = Some(52.52);
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "location.longitude"));
    }

    #[test]
    fn test_zero_watchdog_is_an_error() {
        let mut config = Config::default();
        config.refresh.watchdog_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "refresh.watchdog_secs"));
    }

    #[test]
    fn test_zero_auto_refresh_is_a_warning() {
        let mut config = Config::default();
        config.refresh.auto_minutes = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "refresh.auto_minutes"));
    }

    #[test]
    fn test_coordinates_pair_helper() {
        assert_eq!(
            with_coordinates(1.5, 2.5).coordinates(),
            Some((1.5, 2.5))
        );
        assert_eq!(Config::default().coordinates(), None);
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = with_coordinates(52.52, 13.405);
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.coordinates(), Some((52.52, 13.405)));
        assert_eq!(parsed.refresh.watchdog_secs, 12);
    }
}
