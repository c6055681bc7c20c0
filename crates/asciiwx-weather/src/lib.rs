//! Location and weather lookups for the panel.
//!
//! Provides the three data collaborators the refresh pipeline drives: a
//! location source, reverse geocoding via Nominatim and current conditions
//! via Open-Meteo. Both HTTP services are free and need no API key.

pub mod geocode;
pub mod location;
pub mod meteo;
pub mod types;

pub use geocode::{NominatimLookup, PlaceLookup};
pub use location::{FixedLocator, LocationSource};
pub use meteo::{OpenMeteoLookup, WeatherLookup};
pub use types::{Coordinates, CurrentConditions, FetchError, LocationError, LocationOptions};
