//! Device location acquisition.

use async_trait::async_trait;

use crate::types::{Coordinates, LocationError, LocationOptions};

/// Source of the device position. One acquisition per call; implementations
/// enforce their own timeout from the options.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn acquire(&self, options: &LocationOptions) -> Result<Coordinates, LocationError>;
}

/// Position pinned by configuration.
///
/// Headless hosts have no geolocation capability, so the position comes
/// from the config file. Without configured coordinates every acquisition
/// reports the service unavailable, which the refresh pipeline downgrades
/// to the denied marker instead of failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocator {
    coordinates: Option<Coordinates>,
}

impl FixedLocator {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationSource for FixedLocator {
    async fn acquire(&self, _options: &LocationOptions) -> Result<Coordinates, LocationError> {
        match self.coordinates {
            Some(coordinates) => Ok(coordinates),
            None => Err(LocationError::ServiceUnavailable),
        }
    }
}
