//! Reverse geocoding: convert coordinates to a place name.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::types::{Coordinates, FetchError};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "asciiwx/0.1.0 (https://github.com/asciiwx/asciiwx)";

/// Resolves coordinates to a raw place name. The caller normalizes the
/// name into a display token; implementations return it as the provider
/// sent it.
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn place_name(&self, at: Coordinates) -> Result<String, FetchError>;
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
}

impl NominatimAddress {
    /// First present field wins: city > town > village > hamlet >
    /// municipality > county.
    fn preferred(self) -> Option<String> {
        self.city
            .or(self.town)
            .or(self.village)
            .or(self.hamlet)
            .or(self.municipality)
            .or(self.county)
    }
}

/// Nominatim-backed place lookup.
#[derive(Debug, Clone)]
pub struct NominatimLookup {
    client: Client,
    base_url: String,
}

impl NominatimLookup {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client()?,
            base_url: NOMINATIM_URL.to_string(),
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
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

#[async_trait]
impl PlaceLookup for NominatimLookup {
    async fn place_name(&self, at: Coordinates) -> Result<String, FetchError> {
        let url = format!(
            "{}?lat={}&lon={}&format=json&addressdetails=1&layer=address&zoom=10",
            self.base_url, at.latitude, at.longitude
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: NominatimResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let name = body
            .address
            .and_then(NominatimAddress::preferred)
            .ok_or_else(|| FetchError::Malformed("no usable place field in address".to_string()))?;

        tracing::debug!("Reverse geocoded to: {}", name);
        Ok(name)
    }
}
