//! Geocoding errors

use thiserror::Error;

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Could not reach the provider
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Provider answered with a non-success status
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Provider rejected the API key
    #[error("Geocoding API key rejected")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Geocoding rate limit exceeded")]
    RateLimitExceeded,

    /// Response could not be parsed or held invalid coordinates
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    /// Whether retrying the same request later could succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RateLimitExceeded | Self::Timeout
        )
    }
}

impl From<reqwest::Error> for GeocodingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}
