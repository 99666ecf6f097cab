//! SkyView HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use application::{
    FeedbackService, IngestionService, LocationResolver, QueryService,
    ports::{DatabaseHealthPort, FeedbackStorePort, GeocodePort, LocationStorePort, ObservationStorePort},
};
use infrastructure::{
    AppConfig, DisabledGeocoder, GeocodingAdapter, SqliteDatabaseHealth, SqliteFeedbackStore,
    SqliteLocationStore, SqliteObservationStore, create_pool,
};
use presentation_http::{routes, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configuration first: it decides the log format
    let config_result = AppConfig::load();
    let config = config_result.as_ref().cloned().unwrap_or_default();

    init_tracing(config.server.json_logs());

    info!("🌤️ SkyView v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = &config_result {
        warn!("Failed to load config, using defaults: {}", e);
    }
    for warning in config.warnings() {
        warn!("{warning}");
    }

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = %config.server.port,
        database = %config.database.path,
        geocoding = config.geocoding.is_enabled(),
        "Configuration loaded"
    );

    set_expose_internal_errors(!config.is_production());

    // Storage
    let pool = Arc::new(
        create_pool(&config.database)
            .map_err(|e| anyhow::anyhow!("Failed to open database: {e}"))?,
    );
    let locations: Arc<dyn LocationStorePort> = Arc::new(SqliteLocationStore::new(Arc::clone(&pool)));
    let observations: Arc<dyn ObservationStorePort> =
        Arc::new(SqliteObservationStore::new(Arc::clone(&pool)));
    let feedback: Arc<dyn FeedbackStorePort> = Arc::new(SqliteFeedbackStore::new(Arc::clone(&pool)));
    let database_health: Arc<dyn DatabaseHealthPort> = Arc::new(SqliteDatabaseHealth::new(pool));

    // Geocoding
    let geocoder: Arc<dyn GeocodePort> = match config.geocoding.to_client_config() {
        Some(client_config) => Arc::new(
            GeocodingAdapter::open_weather_map(&client_config)
                .map_err(|e| anyhow::anyhow!("Failed to initialize geocoding: {e}"))?,
        ),
        None => Arc::new(DisabledGeocoder),
    };

    // Services
    let resolver = LocationResolver::new(
        Arc::clone(&locations),
        Arc::clone(&geocoder),
        config.ingestion.resolver_config(),
    );
    let ingestion = IngestionService::new(
        resolver,
        Arc::clone(&observations),
        config.ingestion.service_config(),
    );
    let query = QueryService::new(
        locations,
        observations,
        Arc::clone(&feedback),
        geocoder,
        config.ingestion.geocode_timeout(),
    );

    let addr = config.server.bind_address();
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    let state = AppState {
        ingestion: Arc::new(ingestion),
        query: Arc::new(query),
        feedback: Arc::new(FeedbackService::new(feedback)),
        database_health,
        config: Arc::new(config),
    };

    let app = routes::create_router(state);

    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);
    info!("📚 API docs: http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "skyview_server=debug,presentation_http=debug,application=debug,infrastructure=debug,tower_http=debug"
            .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("⏳ Waiting up to {:?} for connections to close...", timeout);
}
