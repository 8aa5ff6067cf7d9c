//! Durable per-user statistics storage.
//!
//! ## Architecture
//!
//! The `Database` struct implements [`RecordStore`] on top of a single SQLite
//! table (`user_data`, see [`schema`]). It holds only the file path and
//! connection settings; every operation opens its own connection, which keeps
//! the handle `Send + Sync` and lets different users be served concurrently.

pub mod connection;
pub mod helpers;
mod records;
pub mod schema;
pub mod traits;

pub use schema::setup_schema;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Default wait for a locked database before a write fails
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// SQLite-backed record store
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Database {
    /// Open (creating if needed) the store at `database_path` and bring the schema up to date
    pub fn new(database_path: impl AsRef<Path>) -> AppResult<Self> {
        Self::with_busy_timeout(database_path, DEFAULT_BUSY_TIMEOUT)
    }

    pub fn with_busy_timeout(
        database_path: impl AsRef<Path>,
        busy_timeout: Duration,
    ) -> AppResult<Self> {
        let path = database_path.as_ref().to_path_buf();
        connection::ensure_file_backed(&path)?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let db = Self { path, busy_timeout };
        let conn = db.connect()?;
        connection::enable_wal(&conn)?;
        setup_schema(&conn)?;

        info!("Database initialised at: {}", db.path.display());
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fresh connection for one unit of work
    pub fn connect(&self) -> AppResult<Connection> {
        connection::open_connection(&self.path, self.busy_timeout)
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Database path='{}'>", self.path.display())
    }
}
