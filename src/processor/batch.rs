//! Aggregation of the files extracted from one archive.
//!
//! Entries are handled in extraction order. Every accepted entry is written to
//! the store before the next one is looked at, so a failure part-way through
//! keeps the entries that were already counted. There is no cursor: a batch
//! interrupted by a restart is not resumed.
//!
//! Notifications are best effort: a sink failure is logged and the batch
//! carries on.

use super::aggregator::{self, Aggregation};
use crate::database::RecordStore;
use crate::errors::AppResult;
use crate::notify::Notifier;
use crate::types::{ExtractedFile, UserId, UserStatsRecord};
use crate::utils::format::{format_bytes, pluralize};
use tracing::{debug, info};

/// Tally of one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub processed: u64,
    pub skipped: u64,
}

/// Fold extracted files into `record`, persisting after each accepted file.
///
/// `total_download_size` is left alone; the caller adds the archive's own size
/// once the batch is done.
pub fn process_batch<R>(
    store: &R,
    user_id: UserId,
    record: &mut UserStatsRecord,
    files: &[ExtractedFile],
    notifier: &Notifier<'_>,
) -> AppResult<BatchOutcome>
where
    R: RecordStore + ?Sized,
{
    let mut outcome = BatchOutcome::default();

    for file in files {
        match aggregator::apply(record, &file.arrival()) {
            Aggregation::Ignored { extension } => {
                info!(
                    "File '{}' inside archive ignored due to its extension ({}).",
                    file.name, extension
                );
                outcome.skipped += 1;
            }
            Aggregation::Counted { .. } => {
                debug!(
                    "Processing file: '{}' ({})",
                    file.name,
                    format_bytes(file.size)
                );
                store.put(user_id, record)?;
                outcome.processed += 1;
                notifier.send_or_warn(&format!(
                    "File received via archive: '{}' ({}).",
                    file.name,
                    format_bytes(file.size)
                ));
            }
        }
    }

    if outcome.skipped > 0 {
        notifier.send_or_warn(&format!(
            "Skipped {} inside the archive due to ignored extensions.",
            pluralize(outcome.skipped, "file", "files")
        ));
    }

    Ok(outcome)
}
