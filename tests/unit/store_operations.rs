//! Record store tests
//!
//! Exercises the SQLite-backed `RecordStore`: round trips, reset policies,
//! legacy row shapes and row enumeration.

use anyhow::Result;
use file_stats::database::{Database, RecordStore, ResetPolicy};
use file_stats::errors::AppError;
use file_stats::types::{ExtensionStats, UserStatsRecord};

use crate::common::database::TestDatabase;

fn sample_record() -> UserStatsRecord {
    let mut record = UserStatsRecord {
        total_size: 1500,
        total_download_size: 2000,
        file_count: 3,
        streamable: 1,
        ..Default::default()
    };
    record.extension_categories.insert(
        ".mp4".to_string(),
        ExtensionStats {
            count: 1,
            size: 1000,
            streamable: 1,
        },
    );
    record.extension_categories.insert(
        ".txt".to_string(),
        ExtensionStats {
            count: 2,
            size: 500,
            streamable: 0,
        },
    );
    record.ignored_extensions.insert(".exe".to_string());
    record
}

#[test]
fn test_unknown_user_reads_zero_record() -> Result<()> {
    let test_db = TestDatabase::new()?;
    let db = test_db.database();

    assert_eq!(db.get(99)?, UserStatsRecord::default());
    assert!(db.is_empty(99)?);
    assert!(!db.exists(99)?);
    Ok(())
}

#[test]
fn test_put_then_get() -> Result<()> {
    let test_db = TestDatabase::new()?;
    let db = test_db.database();

    let record = sample_record();
    db.put(1, &record)?;
    assert_eq!(db.get(1)?, record);
    assert!(db.exists(1)?);
    assert!(!db.is_empty(1)?);

    // Upsert replaces the whole record
    let mut updated = record.clone();
    updated.extension_categories.remove(".txt");
    updated.file_count = 1;
    updated.total_size = 1000;
    db.put(1, &updated)?;
    assert_eq!(db.get(1)?, updated);
    assert_eq!(db.count()?, 1);
    Ok(())
}

#[test]
fn test_records_survive_reopen() -> Result<()> {
    let test_db = TestDatabase::new()?;
    test_db.database().put(5, &sample_record())?;

    let reopened = Database::new(test_db.path())?;
    assert_eq!(reopened.get(5)?, sample_record());
    Ok(())
}

#[test]
fn test_reset_clearing_ignored() -> Result<()> {
    let test_db = TestDatabase::new()?;
    let db = test_db.database();

    db.put(1, &sample_record())?;
    db.reset(1, ResetPolicy::ClearIgnored)?;

    assert_eq!(db.get(1)?, UserStatsRecord::default());
    Ok(())
}

#[test]
fn test_reset_keeping_ignored() -> Result<()> {
    let test_db = TestDatabase::new()?;
    let db = test_db.database();

    db.put(1, &sample_record())?;
    db.reset(1, ResetPolicy::KeepIgnored)?;

    let record = db.get(1)?;
    assert!(record.is_empty());
    assert_eq!(record.total_download_size, 0);
    assert!(record.is_ignored(".exe"));
    Ok(())
}

#[test]
fn test_legacy_category_counts_are_migrated() -> Result<()> {
    let test_db = TestDatabase::new()?;
    let conn = test_db.raw_connection()?;
    conn.execute(
        "INSERT INTO user_data (user_id, total_size, total_download_size, file_count, streamable, extension_categories, ignored_extensions)
         VALUES (7, 300, 300, 3, 0, '{\".pdf\": 2, \".txt\": {\"count\": 1, \"size\": 100}}', NULL)",
        [],
    )?;

    let record = test_db.database().get(7)?;
    assert_eq!(
        record.extension_categories[".pdf"],
        ExtensionStats {
            count: 2,
            size: 0,
            streamable: 0
        }
    );
    assert_eq!(record.extension_categories[".txt"].size, 100);
    assert!(record.ignored_extensions.is_empty());
    Ok(())
}

#[test]
fn test_malformed_row_is_invalid_shape() -> Result<()> {
    let test_db = TestDatabase::new()?;
    let conn = test_db.raw_connection()?;
    conn.execute(
        "INSERT INTO user_data (user_id, file_count, extension_categories) VALUES (8, 1, '[1, 2, 3]')",
        [],
    )?;

    let err = test_db.database().get(8).unwrap_err();
    assert!(matches!(err, AppError::InvalidRecordShape { user_id: 8, .. }));
    Ok(())
}

#[test]
fn test_enumerate_and_delete() -> Result<()> {
    let test_db = TestDatabase::new()?;
    let db = test_db.database();

    for user_id in [30, 10, 20] {
        db.put(user_id, &sample_record())?;
    }
    assert_eq!(db.user_ids()?, vec![10, 20, 30]);
    assert_eq!(db.count()?, 3);

    assert!(db.delete(20)?);
    assert!(!db.delete(20)?);
    assert_eq!(db.user_ids()?, vec![10, 30]);
    Ok(())
}
