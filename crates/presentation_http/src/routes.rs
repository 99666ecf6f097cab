//! Route definitions

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers, middleware::cors_layer, openapi, state::AppState};

/// Create the main router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_size_json_bytes;
    let cors = cors_layer(&state.config.server);

    let router = Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Weather API (v1)
        .route(
            "/v1/weather",
            get(handlers::weather::list_weather).post(handlers::weather::ingest),
        )
        .route("/v1/weather/search", get(handlers::weather::search_weather))
        .route("/v1/coordinates", get(handlers::coordinates::get_coordinates))
        // Feedback API (v1)
        .route("/v1/feedback", post(handlers::feedback::submit_feedback))
        .route("/v1/feedback/stats", get(handlers::feedback::feedback_stats))
        // API documentation
        .merge(openapi::create_openapi_routes())
        .with_state(state)
        // Enforced by the body extractors, so oversized bodies get a JSON 413
        .layer(DefaultBodyLimit::max(body_limit));

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    // Outermost so every request, rejected or not, is traced
    router.layer(TraceLayer::new_for_http())
}
