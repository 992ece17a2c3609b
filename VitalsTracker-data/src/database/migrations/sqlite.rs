use rusqlite::Connection;
use tracing::info;

use crate::database::DatabaseError;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Running SQLite migrations");

    create_kv_store_table(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

/// Create the key-value table backing the history store
fn create_kv_store_table(conn: &Connection) -> Result<(), DatabaseError> {
    info!("Creating kv_store table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;

    Ok(())
}
