//! CORS configuration

use axum::http::{HeaderValue, Method};
use infrastructure::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Build the CORS layer, or `None` when CORS is disabled
///
/// An empty origin list allows any origin (development). Otherwise only the
/// configured origins may call the API; unparsable entries are skipped.
pub fn cors_layer(config: &ServerConfig) -> Option<CorsLayer> {
    if !config.cors_enabled {
        return None;
    }

    if config.allowed_origins.is_empty() {
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
    )
}
