use super::helpers::{encode_collections, to_sql_integer, RawRecordRow, RECORD_SELECT_COLUMNS};
use super::traits::{RecordStore, ResetPolicy};
use super::Database;
use crate::errors::{AppError, AppResult};
use crate::types::{UserId, UserStatsRecord};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

const UPSERT_SQL: &str = "INSERT OR REPLACE INTO user_data \
    (user_id, total_size, total_download_size, file_count, streamable, \
     extension_categories, ignored_extensions) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

fn read_record(conn: &Connection, user_id: UserId) -> AppResult<Option<UserStatsRecord>> {
    let raw = conn
        .query_row(
            &format!(
                "SELECT {} FROM user_data WHERE user_id = ?1",
                RECORD_SELECT_COLUMNS
            ),
            params![user_id],
            RawRecordRow::from_row,
        )
        .optional()
        .map_err(|e| match e {
            rusqlite::Error::InvalidColumnType(index, name, kind) => AppError::InvalidRecordShape {
                user_id,
                reason: format!("column {} ({}) has type {}", index, name, kind),
            },
            other => AppError::Storage(other),
        })?;

    raw.map(|raw| raw.into_record(user_id)).transpose()
}

fn write_record(conn: &Connection, user_id: UserId, record: &UserStatsRecord) -> AppResult<()> {
    let (categories, ignored) = encode_collections(record)?;
    conn.execute(
        UPSERT_SQL,
        params![
            user_id,
            to_sql_integer(record.total_size, "total_size")?,
            to_sql_integer(record.total_download_size, "total_download_size")?,
            to_sql_integer(record.file_count, "file_count")?,
            to_sql_integer(record.streamable, "streamable")?,
            categories,
            ignored,
        ],
    )?;
    Ok(())
}

impl RecordStore for Database {
    fn get(&self, user_id: UserId) -> AppResult<UserStatsRecord> {
        let conn = self.connect()?;
        Ok(read_record(&conn, user_id)?.unwrap_or_default())
    }

    fn put(&self, user_id: UserId, record: &UserStatsRecord) -> AppResult<()> {
        let conn = self.connect()?;
        write_record(&conn, user_id, record)?;
        debug!(
            "Stored record for user {}: {} files, {} bytes",
            user_id, record.file_count, record.total_size
        );
        Ok(())
    }

    fn reset(&self, user_id: UserId, policy: ResetPolicy) -> AppResult<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        let cleared = match policy {
            ResetPolicy::ClearIgnored => UserStatsRecord::default(),
            ResetPolicy::KeepIgnored => read_record(&tx, user_id)?
                .map(|record| record.cleared_keeping_ignored())
                .unwrap_or_default(),
        };
        write_record(&tx, user_id, &cleared)?;
        tx.commit()?;

        debug!("Reset record for user {} ({:?})", user_id, policy);
        Ok(())
    }

    fn exists(&self, user_id: UserId) -> AppResult<bool> {
        let conn = self.connect()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM user_data WHERE user_id = ?1",
                params![user_id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn delete(&self, user_id: UserId) -> AppResult<bool> {
        let conn = self.connect()?;
        let removed = conn.execute(
            "DELETE FROM user_data WHERE user_id = ?1",
            params![user_id],
        )?;
        Ok(removed > 0)
    }

    fn count(&self) -> AppResult<u64> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM user_data", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn user_ids(&self) -> AppResult<Vec<UserId>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT user_id FROM user_data ORDER BY user_id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<UserId>, _>>()?;
        Ok(ids)
    }
}
