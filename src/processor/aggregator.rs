//! Single-file aggregation and file classification rules.
//!
//! Everything here is pure: a record goes in, the updated record comes out.
//! Persistence and notifications belong to the callers.

use crate::types::{ExtensionStats, FileArrival, UserStatsRecord};

/// Result of folding one file into a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    Counted { extension: String },
    Ignored { extension: String },
}

impl Aggregation {
    pub fn extension(&self) -> &str {
        match self {
            Aggregation::Counted { extension } | Aggregation::Ignored { extension } => extension,
        }
    }

    pub fn is_counted(&self) -> bool {
        matches!(self, Aggregation::Counted { .. })
    }
}

/// Lowercase extension of `file_name`, including the leading dot.
///
/// Only the final path component is considered. A dot only starts an
/// extension if some non-dot character precedes it, so hidden files such as
/// `.bashrc` have none. Names without an extension yield `""`.
pub fn extension_of(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rfind('.') {
        Some(dot) if base[..dot].chars().any(|c| c != '.') => base[dot..].to_lowercase(),
        _ => String::new(),
    }
}

/// Fold one file into the record unless its extension is ignored.
///
/// Does not touch `total_download_size`; see [`apply_standalone`].
pub fn apply(record: &mut UserStatsRecord, file: &FileArrival<'_>) -> Aggregation {
    let extension = extension_of(file.name);
    if record.is_ignored(&extension) {
        return Aggregation::Ignored { extension };
    }

    let video = file.is_video();
    record.total_size = record.total_size.saturating_add(file.size);
    record.file_count = record.file_count.saturating_add(1);
    if video {
        record.streamable = record.streamable.saturating_add(1);
    }

    let stats: &mut ExtensionStats = record
        .extension_categories
        .entry(extension.clone())
        .or_default();
    stats.count = stats.count.saturating_add(1);
    stats.size = stats.size.saturating_add(file.size);
    if video {
        stats.streamable = stats.streamable.saturating_add(1);
    }

    Aggregation::Counted { extension }
}

/// Aggregate a file that arrived on its own: its download cost is its own size
pub fn apply_standalone(record: &mut UserStatsRecord, file: &FileArrival<'_>) -> Aggregation {
    let outcome = apply(record, file);
    if outcome.is_counted() {
        record.total_download_size = record.total_download_size.saturating_add(file.size);
    }
    outcome
}
