//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2. Every connection the pool
//! opens gets the same PRAGMA setup, so foreign keys and the busy timeout
//! hold no matter which connection a request is handed. Each connection also
//! gets a `casefold(text)` SQL function: SQLite's own `lower()` and `LIKE`
//! only fold ASCII letters.

use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, functions::FunctionFlags};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Database directory error: {0}")]
    Directory(#[from] std::io::Error),
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

const IN_MEMORY: &str = ":memory:";

/// Create a new connection pool and bring the schema up to date
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating database connection pool");

    let in_memory = config.path == IN_MEMORY;

    let manager = if in_memory {
        SqliteConnectionManager::memory()
    } else {
        if let Some(parent) = Path::new(&config.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        SqliteConnectionManager::file(&config.path)
    };
    let manager = manager.with_init(initialize_connection);

    let mut builder = Pool::builder().max_size(config.max_connections.max(1));
    if in_memory {
        // Each in-memory connection is its own database; never recycle it.
        builder = builder.max_lifetime(None).idle_timeout(None);
    }
    let pool = builder.build(manager)?;

    if config.run_migrations {
        let conn = pool.get()?;
        super::migrations::run_migrations(&conn)?;
    }

    debug!("Database connection pool created successfully");
    Ok(pool)
}

/// Per-connection settings
fn initialize_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )?;
    register_casefold(conn)
}

/// Unicode lowercase, `NULL` stays `NULL`
fn register_casefold(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|text| text.to_lowercase())),
    )
}
