//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `database`: SQLite database settings
//! - `geocoding`: OpenWeatherMap geocoding provider
//! - `ingestion`: ingestion defaults and resolver timeout
//!
//! Values are layered: serde defaults, then an optional `config.toml`, then
//! environment variables prefixed with `SKYVIEW` using `__` as the section
//! separator (e.g. `SKYVIEW__SERVER__PORT=9000`).

mod database;
mod geocoding;
mod ingestion;
mod server;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use database::DatabaseConfig;
pub use geocoding::GeocodingAppConfig;
pub use ingestion::IngestionConfig;
pub use server::ServerConfig;

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment - internal error details are exposed
    #[default]
    Development,
    /// Production environment - internal error details are suppressed
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub environment: Environment,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    #[serde(default)]
    pub ingestion: IngestionConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the given file stem (any format `config` supports)
    pub fn load_from(file: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("SKYVIEW")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Human-readable warnings about risky settings; empty when all is well
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !self.geocoding.is_enabled() {
            warnings.push(
                "geocoding.api_key is not set; new cities will get placeholder coordinates"
                    .to_string(),
            );
        }
        if self.is_production() && self.server.cors_enabled && self.server.allowed_origins.is_empty()
        {
            warnings.push(
                "server.allowed_origins is empty in production; any origin is allowed".to_string(),
            );
        }
        if self.database.path == ":memory:" && self.database.max_connections > 1 {
            warnings.push(
                "in-memory database with more than one connection; each connection sees its own database"
                    .to_string(),
            );
        }

        warnings
    }
}
