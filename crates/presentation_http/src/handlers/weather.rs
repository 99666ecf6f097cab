//! Weather observation handlers
//!
//! Ingestion plus the list and search views.

use application::ports::ObservationView;
use axum::{Json, extract::State};
use domain::entities::WeatherReading;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::common::{lenient_f64, lenient_opt_f64};
use crate::{
    error::{ApiError, IngestError},
    middleware::{ApiQuery, ValidatedJson},
    state::AppState,
};

/// Format of `report_time` in observation views
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Ingest request body
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "city": "Columbus",
    "temperature": 21.5,
    "humidity": 40,
    "weather_condition": "Cloudy",
    "wind_speed": 3.2
}))]
pub struct IngestRequest {
    /// City name, stored exactly as given
    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub city: String,

    /// Temperature; numeric strings are accepted
    #[serde(deserialize_with = "lenient_f64")]
    #[validate(custom(function = "finite"))]
    pub temperature: f64,

    /// Relative humidity in percent
    #[serde(deserialize_with = "lenient_f64")]
    #[validate(range(min = 0.0, max = 100.0, message = "must be between 0 and 100"))]
    pub humidity: f64,

    /// Defaults to "Clear" when absent
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub weather_condition: Option<String>,

    /// Defaults to 5 when absent
    #[serde(default, deserialize_with = "lenient_opt_f64")]
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub wind_speed: Option<f64>,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn finite(value: f64) -> Result<(), validator::ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("not_finite").with_message("must be a finite number".into()))
    }
}

impl IngestRequest {
    fn into_reading(self) -> (String, WeatherReading) {
        let mut reading = WeatherReading::new(self.temperature, self.humidity);
        if let Some(condition) = self.weather_condition {
            reading = reading.with_condition(condition);
        }
        if let Some(wind_speed) = self.wind_speed {
            reading = reading.with_wind_speed(wind_speed);
        }
        (self.city, reading)
    }
}

/// Ingest success body
#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({"status": "success"}))]
pub struct IngestResponse {
    pub status: &'static str,
}

/// One observation as served to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "City": "Columbus",
    "temperature": 21.5,
    "humidity": 40.0,
    "weather_condition": "Clear",
    "wind_speed": 5.0,
    "report_time": "2026-05-01 14:03:00"
}))]
pub struct WeatherView {
    #[serde(rename = "City")]
    pub city: String,
    pub temperature: f64,
    pub humidity: f64,
    pub weather_condition: String,
    pub wind_speed: f64,
    /// UTC, `YYYY-MM-DD HH:MM:SS`
    pub report_time: String,
}

impl From<ObservationView> for WeatherView {
    fn from(view: ObservationView) -> Self {
        Self {
            city: view.city,
            temperature: view.temperature,
            humidity: view.humidity,
            weather_condition: view.condition,
            wind_speed: view.wind_speed,
            report_time: view.observed_at.format(REPORT_TIME_FORMAT).to_string(),
        }
    }
}

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Case-insensitive substring of the city name; empty or missing matches all
    #[serde(default)]
    pub city: String,
}

/// Record one weather observation
///
/// POST /v1/weather
#[utoipa::path(
    post,
    path = "/v1/weather",
    tag = "weather",
    request_body = IngestRequest,
    responses(
        (status = 200, description = "Observation stored", body = IngestResponse),
        (status = 400, description = "Invalid request", body = crate::error::StatusErrorResponse),
        (status = 413, description = "Body exceeds the size limit", body = crate::error::StatusErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::StatusErrorResponse)
    )
)]
#[instrument(skip_all, fields(city = %request.city))]
pub async fn ingest(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<IngestRequest>,
) -> Result<Json<IngestResponse>, IngestError> {
    let (city, reading) = request.into_reading();
    let observation_id = state.ingestion.ingest_reading(&city, reading).await?;
    debug!(%observation_id, "Observation ingested");

    Ok(Json(IngestResponse { status: "success" }))
}

/// Every stored observation
///
/// GET /v1/weather
#[utoipa::path(
    get,
    path = "/v1/weather",
    tag = "weather",
    responses(
        (status = 200, description = "All observations ordered by time", body = Vec<WeatherView>),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_weather(State(state): State<AppState>) -> Result<Json<Vec<WeatherView>>, ApiError> {
    let views = state.query.all_observations().await?;
    Ok(Json(views.into_iter().map(WeatherView::from).collect()))
}

/// Observations whose city name contains the given fragment
///
/// GET /v1/weather/search?city=
#[utoipa::path(
    get,
    path = "/v1/weather/search",
    tag = "weather",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching observations ordered by time", body = Vec<WeatherView>),
        (status = 400, description = "Malformed query string", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search_weather(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Json<Vec<WeatherView>>, ApiError> {
    let views = state.query.search_by_city_fragment(&query.city).await?;
    Ok(Json(views.into_iter().map(WeatherView::from).collect()))
}
