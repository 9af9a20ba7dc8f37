//! Destructive schema initialization for the client directory.
//!
//! # Responsibility
//! - Drop and recreate the `clients` and `phones` tables in one batch.
//! - Clean up the legacy `clients_phones` junction table when present.
//!
//! # Invariants
//! - Re-running `init_schema` always yields the same empty two-table layout.
//! - Prior contents are irreversibly lost; callers opt in explicitly.
//! - Not safe for concurrent callers; there is no locking here.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Drops any existing client directory tables and recreates them empty.
///
/// # Side effects
/// - Irreversible loss of all rows previously stored in the dropped tables.
/// - Emits `schema_init` logging events with duration and status.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    let started_at = Instant::now();
    info!("event=schema_init module=db status=start");

    match conn.execute_batch(SCHEMA_SQL) {
        Ok(()) => {
            info!(
                "event=schema_init module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=schema_init module=db status=error duration_ms={} error_code=schema_init_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}
