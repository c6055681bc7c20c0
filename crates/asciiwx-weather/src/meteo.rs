//! Current conditions via the Open-Meteo forecast API.
//! See: https://open-meteo.com/en/docs - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::{Coordinates, CurrentConditions, FetchError};

const OPEN_METEO_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Current-conditions variables requested from the API; wind is asked for
/// in m/s so no unit conversion happens on our side.
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,wind_speed_10m";

/// Fetches the current conditions at a position.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn current_conditions(&self, at: Coordinates) -> Result<CurrentConditions, FetchError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentBlock>,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: Option<String>,
    temperature_2m: Option<f64>,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: Option<f64>,
}

/// Open-Meteo backed weather lookup.
#[derive(Debug, Clone)]
pub struct OpenMeteoLookup {
    client: Client,
    base_url: String,
}

impl OpenMeteoLookup {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
            base_url: OPEN_METEO_URL.to_string(),
        })
    }

    #[cfg(test)]
    pub fn new_with_base_url(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.to_string(),
        })
    }
}

fn build_client() -> Result<Client, FetchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    Ok(client)
}

#[async_trait]
impl WeatherLookup for OpenMeteoLookup {
    async fn current_conditions(&self, at: Coordinates) -> Result<CurrentConditions, FetchError> {
        let url = format!(
            "{}?latitude={}&longitude={}&current={}&wind_speed_unit=ms&timezone=auto",
            self.base_url, at.latitude, at.longitude, CURRENT_FIELDS
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("Weather lookup returned status {}", response.status());
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let current = body
            .current
            .ok_or_else(|| FetchError::Malformed("no current block".to_string()))?;

        Ok(CurrentConditions {
            temperature: field(current.temperature_2m, "temperature_2m")?,
            wind_speed: field(current.wind_speed_10m, "wind_speed_10m")?,
            humidity: field(current.relative_humidity_2m, "relative_humidity_2m")?,
            observed_at: current
                .time
                .ok_or_else(|| FetchError::Malformed("time missing".to_string()))?,
        })
    }
}

fn field(value: Option<f64>, name: &str) -> Result<f64, FetchError> {
    value.ok_or_else(|| FetchError::Malformed(format!("{name} missing")))
}
