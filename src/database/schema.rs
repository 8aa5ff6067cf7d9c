//! `user_data` table definition and in-place upgrades.
//!
//! One row per user. Numeric aggregates are plain INTEGER columns; the two
//! collections are JSON text:
//!
//! - `extension_categories`: object of extension -> `{count, size, streamable}`
//!   (rows from the first release hold a bare count instead of the object)
//! - `ignored_extensions`: array of normalized extensions, added in a later
//!   release and back-filled with `'[]'` when missing

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::{debug, info};

pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_data (
            user_id INTEGER PRIMARY KEY,
            total_size INTEGER DEFAULT 0,
            total_download_size INTEGER DEFAULT 0,
            file_count INTEGER DEFAULT 0,
            streamable INTEGER DEFAULT 0,
            extension_categories TEXT DEFAULT '{}',
            ignored_extensions TEXT DEFAULT '[]'
        );
        "#,
    )?;

    upgrade_ignored_extensions(connection)?;

    debug!("user_data schema ready");
    Ok(())
}

/// Add `ignored_extensions` to stores created before the ignore list existed
fn upgrade_ignored_extensions(connection: &Connection) -> AppResult<()> {
    if column_exists(connection, "user_data", "ignored_extensions")? {
        return Ok(());
    }

    connection.execute(
        "ALTER TABLE user_data ADD COLUMN ignored_extensions TEXT DEFAULT '[]'",
        [],
    )?;
    info!("Upgraded user_data: added ignored_extensions column");
    Ok(())
}

fn column_exists(connection: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = connection.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names.iter().any(|name| name == column))
}
