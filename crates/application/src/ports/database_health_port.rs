//! Database health check port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a storage health probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Whether a pooled connection answered `SELECT 1`
    pub reachable: bool,
    /// Storage engine version, e.g. `SQLite 3.46.0`
    pub version: Option<String>,
    /// Connections currently held by the pool
    pub pool_size: Option<u32>,
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    #[must_use]
    pub const fn reachable() -> Self {
        Self {
            reachable: true,
            version: None,
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            version: None,
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub const fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }
}

/// Port for storage readiness checks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Lightweight reachability probe
    async fn is_available(&self) -> bool;

    /// Detailed health information
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
