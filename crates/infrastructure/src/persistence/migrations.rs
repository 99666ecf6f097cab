//! Database migrations
//!
//! Schema versions are tracked in a single-row `schema_version` table and
//! applied in order. Each `migrate_vN` function is idempotent
//! (`IF NOT EXISTS`), so a partially applied upgrade can be re-run.
//!
//! ## Adding New Migrations
//!
//! 1. Increment `SCHEMA_VERSION`
//! 2. Add a new `migrate_vN` function
//! 3. Register it in `MIGRATIONS`

use rusqlite::Connection;
use tracing::{debug, error, info};

use super::connection::DatabaseError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

type Migration = fn(&Connection) -> Result<(), DatabaseError>;

const MIGRATIONS: [(i32, &str, Migration); 2] = [
    (1, "locations and observations", migrate_v1),
    (2, "feedback", migrate_v2),
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_schema_version(conn)?;

    if current_version >= SCHEMA_VERSION {
        debug!(version = current_version, "Database schema is up to date");
        return Ok(());
    }

    info!(
        from_version = current_version,
        to_version = SCHEMA_VERSION,
        "Running database migrations"
    );

    for (version, description, migrate) in MIGRATIONS {
        if current_version < version {
            if let Err(e) = migrate(conn) {
                error!(version, error = %e, "Migration V{version:03} ({description}) failed");
                return Err(e);
            }
        }
    }

    set_schema_version(conn, SCHEMA_VERSION)?;
    info!(version = SCHEMA_VERSION, "Database migrations complete");
    Ok(())
}

/// Get current schema version
pub fn get_schema_version(conn: &Connection) -> Result<i32, DatabaseError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration to version 1: locations and their observations
fn migrate_v1(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V001: locations and observations");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS locations (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            country TEXT NOT NULL,
            latitude REAL NOT NULL,
            longitude REAL NOT NULL,
            owner_id TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS observations (
            id TEXT PRIMARY KEY,
            location_id TEXT NOT NULL,
            temperature REAL NOT NULL,
            humidity REAL NOT NULL,
            condition TEXT NOT NULL,
            wind_speed REAL NOT NULL,
            observed_at TEXT NOT NULL,
            FOREIGN KEY (location_id) REFERENCES locations(id)
        );

        CREATE INDEX IF NOT EXISTS idx_observations_location ON observations(location_id);
        CREATE INDEX IF NOT EXISTS idx_observations_observed ON observations(observed_at);
        ",
    )?;

    Ok(())
}

/// Migration to version 2: app feedback
fn migrate_v2(conn: &Connection) -> Result<(), DatabaseError> {
    debug!("Applying migration V002: feedback");

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS feedback (
            id TEXT PRIMARY KEY,
            username TEXT NOT NULL,
            liked INTEGER NOT NULL CHECK (liked IN (0, 1)),
            created_at TEXT NOT NULL
        );
        ",
    )?;

    Ok(())
}
