//! Row <-> record conversion shared by the store operations

use crate::errors::{AppError, AppResult};
use crate::types::record::{decode_categories, decode_ignored};
use crate::types::{UserId, UserStatsRecord};
use rusqlite::Row;

/// Standard SELECT columns for record queries, in `RawRecordRow` order
pub const RECORD_SELECT_COLUMNS: &str = "total_size, total_download_size, file_count, \
    streamable, extension_categories, ignored_extensions";

/// Untyped row as SQLite hands it back
///
/// Conversion into `UserStatsRecord` is kept separate so that shape errors can
/// be reported as `InvalidRecordShape` with the user id attached.
#[derive(Debug)]
pub struct RawRecordRow {
    total_size: Option<i64>,
    total_download_size: Option<i64>,
    file_count: Option<i64>,
    streamable: Option<i64>,
    extension_categories: Option<String>,
    ignored_extensions: Option<String>,
}

impl RawRecordRow {
    /// Columns in the order defined by `RECORD_SELECT_COLUMNS`
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            total_size: row.get(0)?,
            total_download_size: row.get(1)?,
            file_count: row.get(2)?,
            streamable: row.get(3)?,
            extension_categories: row.get(4)?,
            ignored_extensions: row.get(5)?,
        })
    }

    pub fn into_record(self, user_id: UserId) -> AppResult<UserStatsRecord> {
        let shape_error = |reason: String| AppError::InvalidRecordShape { user_id, reason };

        let extension_categories = match self.extension_categories.as_deref() {
            None => Default::default(),
            Some(text) => decode_categories(text)
                .map_err(|e| shape_error(format!("extension_categories: {}", e)))?,
        };
        let ignored_extensions = decode_ignored(self.ignored_extensions.as_deref())
            .map_err(|e| shape_error(format!("ignored_extensions: {}", e)))?;

        Ok(UserStatsRecord {
            total_size: to_unsigned(self.total_size, "total_size", user_id)?,
            total_download_size: to_unsigned(
                self.total_download_size,
                "total_download_size",
                user_id,
            )?,
            file_count: to_unsigned(self.file_count, "file_count", user_id)?,
            streamable: to_unsigned(self.streamable, "streamable", user_id)?,
            extension_categories,
            ignored_extensions,
        })
    }
}

fn to_unsigned(value: Option<i64>, column: &str, user_id: UserId) -> AppResult<u64> {
    let value = value.unwrap_or(0);
    u64::try_from(value).map_err(|_| AppError::InvalidRecordShape {
        user_id,
        reason: format!("negative {} ({})", column, value),
    })
}

/// Convert a counter for storage in an INTEGER column
pub fn to_sql_integer(value: u64, column: &str) -> AppResult<i64> {
    i64::try_from(value)
        .map_err(|_| AppError::InvalidData(format!("{} out of range: {}", column, value)))
}

/// JSON text for the two collection columns
pub fn encode_collections(record: &UserStatsRecord) -> AppResult<(String, String)> {
    let categories = serde_json::to_string(&record.extension_categories)
        .map_err(|e| AppError::InvalidData(format!("extension_categories: {}", e)))?;
    let ignored = serde_json::to_string(&record.ignored_extensions)
        .map_err(|e| AppError::InvalidData(format!("ignored_extensions: {}", e)))?;
    Ok((categories, ignored))
}
