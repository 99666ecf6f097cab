//! OpenAPI documentation module
//!
//! Provides OpenAPI 3.0 documentation for the SkyView HTTP API.
//! Includes Swagger UI and ReDoc for interactive API exploration.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for SkyView
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkyView API",
        description = "Weather observation ingestion and lookup",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Health check and readiness endpoints"),
        (name = "weather", description = "Observation ingestion, listing and search"),
        (name = "coordinates", description = "City coordinate lookup"),
        (name = "feedback", description = "Like/dislike feedback")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::weather::ingest,
        handlers::weather::list_weather,
        handlers::weather::search_weather,
        handlers::coordinates::get_coordinates,
        handlers::feedback::submit_feedback,
        handlers::feedback::feedback_stats,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::DatabaseStatus,
            handlers::weather::IngestRequest,
            handlers::weather::IngestResponse,
            handlers::weather::WeatherView,
            handlers::coordinates::CoordinatesResponse,
            handlers::feedback::FeedbackRequest,
            handlers::feedback::FeedbackAck,
            handlers::feedback::FeedbackStatsResponse,
            crate::error::ErrorResponse,
            crate::error::StatusErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Documentation routes: `/swagger-ui`, `/redoc` and `/api-docs/openapi.json`
pub fn create_openapi_routes() -> Router<AppState> {
    let redoc = Redoc::with_url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/redoc", get(|| async move { Html(redoc.to_html()) }))
        // SwaggerUi serves /api-docs/openapi.json itself
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
