//! Database schema migrations.
//!
//! Applies the initial schema: the crm_records customer table and the
//! schema_migrations tracking table.

use rusqlite::Connection;
use tracing::info;

use helpdesk_core::error::HelpdeskError;

/// Run all pending database migrations.
///
/// Currently implements the initial schema (version 1). Future migrations
/// can be added by checking the current version and applying incremental changes.
pub fn run_migrations(conn: &Connection) -> Result<(), HelpdeskError> {
    // Create the migrations tracking table first.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| HelpdeskError::Storage(format!("Failed to create migrations table: {}", e)))?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| HelpdeskError::Storage(format!("Failed to query migration version: {}", e)))?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<(), HelpdeskError> {
    conn.execute_batch(
        "
        -- Customer records. Field lookups address columns by name, so the
        -- column names here are load-bearing for the synonym table.
        CREATE TABLE IF NOT EXISTS crm_records (
            id              INTEGER PRIMARY KEY NOT NULL,
            name            TEXT NOT NULL,
            email           TEXT,
            phone           TEXT,
            company         TEXT,
            status          TEXT,
            last_contact    TEXT,
            source          TEXT,
            notes           TEXT,
            created_at      INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_crm_records_name
            ON crm_records (name);

        -- Record migration.
        INSERT OR IGNORE INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| HelpdeskError::Storage(format!("Failed to apply migration v1: {}", e)))?;

    Ok(())
}
