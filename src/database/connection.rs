//! SQLite connection setup.
//!
//! The store opens a fresh connection per operation so that requests for
//! different users never queue behind a shared handle; SQLite's own file
//! locking (WAL journal plus busy timeout) arbitrates concurrent writers.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub fn open_connection(path: &Path, busy_timeout: Duration) -> AppResult<Connection> {
    let connection = Connection::open(path)?;
    connection.busy_timeout(busy_timeout)?;
    Ok(connection)
}

/// Switch the database file to WAL so readers don't block the writer
pub fn enable_wal(connection: &Connection) -> AppResult<()> {
    let mode: String =
        connection.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    debug!("journal_mode = {}", mode);
    Ok(())
}

/// Per-operation connections cannot share a private in-memory database
pub fn ensure_file_backed(path: &Path) -> AppResult<()> {
    let text = path.to_string_lossy();
    if text.is_empty() || text == ":memory:" || text.contains("mode=memory") {
        return Err(AppError::Config(format!(
            "database path must point to a file, got '{}'",
            text
        )));
    }
    Ok(())
}
