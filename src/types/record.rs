//! Per-user statistics record and its persisted JSON shapes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate for one extension category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStats {
    pub count: u64,
    pub size: u64,
    /// Video files within this category. Absent in rows written before it was tracked.
    #[serde(default)]
    pub streamable: u64,
}

/// A user's aggregate statistics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatsRecord {
    pub total_size: u64,
    pub total_download_size: u64,
    pub file_count: u64,
    pub streamable: u64,
    pub extension_categories: BTreeMap<String, ExtensionStats>,
    pub ignored_extensions: BTreeSet<String>,
}

impl UserStatsRecord {
    /// True when nothing has been counted. The ignore list is deliberately not considered.
    pub fn is_empty(&self) -> bool {
        self.total_size == 0
            && self.total_download_size == 0
            && self.file_count == 0
            && self.streamable == 0
            && self.extension_categories.is_empty()
    }

    pub fn is_ignored(&self, extension: &str) -> bool {
        self.ignored_extensions.contains(extension)
    }

    /// Zero record that keeps the current ignore list
    pub fn cleared_keeping_ignored(&self) -> Self {
        Self {
            ignored_extensions: self.ignored_extensions.clone(),
            ..Self::default()
        }
    }

    /// Sum of per-extension counts and sizes
    pub fn category_totals(&self) -> (u64, u64) {
        self.extension_categories
            .values()
            .fold((0, 0), |(count, size), stats| {
                (count + stats.count, size + stats.size)
            })
    }
}

/// Either shape an `extension_categories` value may have on disk.
///
/// The oldest rows stored a bare file count per extension; those are lifted into
/// `ExtensionStats` with an unknown (zero) size.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredCategory {
    Current(ExtensionStats),
    LegacyCount(u64),
}

impl From<StoredCategory> for ExtensionStats {
    fn from(stored: StoredCategory) -> Self {
        match stored {
            StoredCategory::Current(stats) => stats,
            StoredCategory::LegacyCount(count) => ExtensionStats {
                count,
                size: 0,
                streamable: 0,
            },
        }
    }
}

/// Parse the `extension_categories` column, migrating legacy scalar counts
pub fn decode_categories(json: &str) -> serde_json::Result<BTreeMap<String, ExtensionStats>> {
    let stored: BTreeMap<String, StoredCategory> = serde_json::from_str(json)?;
    Ok(stored
        .into_iter()
        .map(|(extension, value)| (extension, value.into()))
        .collect())
}

/// Parse the `ignored_extensions` column. NULL and empty text mean no ignores.
pub fn decode_ignored(json: Option<&str>) -> serde_json::Result<BTreeSet<String>> {
    match json {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(text),
        _ => Ok(BTreeSet::new()),
    }
}
