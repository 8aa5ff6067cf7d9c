//! Retraction: forget whole extension categories after the fact.
//!
//! Counters shrink by the removed category's totals and saturate at zero, since
//! legacy rows do not always satisfy the count/size invariants.
//!
//! `streamable` is reduced by the category's own video count. Categories written
//! before that count was tracked report zero, so `streamable` is additionally
//! capped at `file_count` to keep `streamable <= file_count`.

use super::ignore_list::normalize_all;
use crate::database::RecordStore;
use crate::errors::AppResult;
use crate::types::{UserId, UserStatsRecord};
use tracing::{debug, info};

/// Remove categories from the record; returns the extensions actually removed
pub fn retract_from_record<S: AsRef<str>>(
    record: &mut UserStatsRecord,
    tokens: &[S],
) -> Vec<String> {
    let mut removed = Vec::new();

    for extension in normalize_all(tokens) {
        let Some(stats) = record.extension_categories.remove(&extension) else {
            continue;
        };

        record.file_count = record.file_count.saturating_sub(stats.count);
        record.total_size = record.total_size.saturating_sub(stats.size);
        record.total_download_size = record.total_download_size.saturating_sub(stats.size);
        record.streamable = record.streamable.saturating_sub(stats.streamable);

        debug!(
            "Retracted {}: {} files, {} bytes",
            extension, stats.count, stats.size
        );
        removed.push(extension);
    }

    record.streamable = record.streamable.min(record.file_count);
    removed
}

/// Retract categories for a user, persisting only if something was removed
pub fn retract<R, S>(store: &R, user_id: UserId, tokens: &[S]) -> AppResult<Vec<String>>
where
    R: RecordStore + ?Sized,
    S: AsRef<str>,
{
    let mut record = store.get(user_id)?;
    let removed = retract_from_record(&mut record, tokens);

    if !removed.is_empty() {
        store.put(user_id, &record)?;
        info!("User {}: retracted {:?}", user_id, removed);
    }
    Ok(removed)
}
