//! City geocoding for SkyView
//!
//! Resolves city names to coordinates through the
//! [OpenWeatherMap geocoding API](https://openweathermap.org/api/geocoding-api).
//!
//! [`GeocodingClient`] is the client trait; [`OpenWeatherMapGeocoder`] implements
//! it with reqwest and an optional moka cache of successful lookups.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geocoding::{GeocodingClient, GeocodingConfig, OpenWeatherMapGeocoder};
//!
//! let client = OpenWeatherMapGeocoder::new(&GeocodingConfig::with_api_key("..."))?;
//! if let Some(city) = client.geocode("Columbus").await? {
//!     println!("{}", city.location);
//! }
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GeocodedCity, GeocodingClient, OpenWeatherMapGeocoder};
pub use config::GeocodingConfig;
pub use error::GeocodingError;
