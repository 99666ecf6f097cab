//! Coordinate lookup handler

use application::CoordinateSource;
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, middleware::ApiQuery, state::AppState};

/// Coordinate query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct CoordinatesQuery {
    /// Exact city name
    pub city: Option<String>,
}

/// Coordinates and the tier that produced them
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"latitude": 39.96, "longitude": -83.0, "source": "db"}))]
pub struct CoordinatesResponse {
    pub latitude: f64,
    pub longitude: f64,
    /// `"db"` for stored locations, `"api"` for a live provider answer
    #[schema(value_type = String)]
    pub source: CoordinateSource,
}

/// Coordinates for a city
///
/// GET /v1/coordinates?city=
///
/// Stored locations answer first; otherwise the geocoding provider is asked
/// and its answer returned without being stored.
#[utoipa::path(
    get,
    path = "/v1/coordinates",
    tag = "coordinates",
    params(CoordinatesQuery),
    responses(
        (status = 200, description = "Coordinates found", body = CoordinatesResponse),
        (status = 400, description = "Missing city or malformed query string", body = crate::error::ErrorResponse),
        (status = 404, description = "City not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_coordinates(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CoordinatesQuery>,
) -> Result<Json<CoordinatesResponse>, ApiError> {
    let city = query
        .city
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("city query parameter is required".to_string()))?;

    let lookup = state
        .query
        .coordinates_for(&city)
        .await?
        .ok_or_else(|| ApiError::NotFound("City not found".to_string()))?;

    Ok(Json(CoordinatesResponse {
        latitude: lookup.coordinates.latitude(),
        longitude: lookup.coordinates.longitude(),
        source: lookup.source,
    }))
}
