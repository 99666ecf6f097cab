//! Wire types for the direct geocoding API

use serde::Deserialize;

/// One candidate from `GET /geo/1.0/direct`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DirectGeocodeResult {
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub country: Option<String>,
}
