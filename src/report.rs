//! Data shown to users about their statistics, and its plain-text rendering.
//!
//! Layout (buttons, HTML) belongs to the transport; this module only decides
//! what is displayed.

use crate::errors::{AppError, AppResult};
use crate::types::{UserId, UserStatsRecord};
use crate::utils::format::{format_bytes, pluralize};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionLine {
    pub extension: String,
    pub count: u64,
    pub size: u64,
    pub size_human: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    pub user_id: UserId,
    pub total_size: u64,
    pub total_size_human: String,
    pub total_download_size: u64,
    pub total_download_size_human: String,
    pub file_count: u64,
    pub streamable: u64,
    pub extensions: Vec<ExtensionLine>,
    pub ignored_extensions: Vec<String>,
    pub is_empty: bool,
}

impl StatsReport {
    pub fn from_record(user_id: UserId, record: &UserStatsRecord) -> Self {
        let extensions = record
            .extension_categories
            .iter()
            .map(|(extension, stats)| ExtensionLine {
                extension: extension.clone(),
                count: stats.count,
                size: stats.size,
                size_human: format_bytes(stats.size),
            })
            .collect();

        Self {
            user_id,
            total_size: record.total_size,
            total_size_human: format_bytes(record.total_size),
            total_download_size: record.total_download_size,
            total_download_size_human: format_bytes(record.total_download_size),
            file_count: record.file_count,
            streamable: record.streamable,
            extensions,
            ignored_extensions: record.ignored_extensions.iter().cloned().collect(),
            is_empty: record.is_empty(),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Total file size: {}\n", self.total_size_human));
        out.push_str(&format!(
            "Total download size: {}\n",
            self.total_download_size_human
        ));
        out.push_str(&format!(
            "Number of files uploaded: {}\n",
            pluralize(self.file_count, "file", "files")
        ));
        out.push_str(&format!(
            "Streamable files: {}\n",
            pluralize(self.streamable, "video", "videos")
        ));

        out.push_str("Extensions:\n");
        if self.extensions.is_empty() {
            out.push_str("No files uploaded yet.\n");
        }
        for line in &self.extensions {
            let label = if line.extension.is_empty() {
                "(no extension)"
            } else {
                line.extension.as_str()
            };
            out.push_str(&format!(
                "{}: {} ({})\n",
                label,
                pluralize(line.count, "file", "files"),
                line.size_human
            ));
        }

        if !self.ignored_extensions.is_empty() {
            out.push_str(&format!(
                "Ignored extensions: {}\n",
                self.ignored_extensions.join(", ")
            ));
        }
        out
    }

    pub fn to_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
    }
}

/// Reply to an ignore-list addition
pub fn ignore_added_message(added: &[String]) -> String {
    if added.is_empty() {
        "All given extensions were already ignored.".to_string()
    } else {
        format!("Added to ignore list: {}", added.join(", "))
    }
}

/// Reply to an ignore-list removal
pub fn ignore_removed_message(removed: &[String]) -> String {
    if removed.is_empty() {
        "No matching extensions found in ignore list.".to_string()
    } else {
        format!("Removed from ignore list: {}", removed.join(", "))
    }
}

/// Reply to an ignore-list query
pub fn ignore_list_message(ignored: &BTreeSet<String>) -> String {
    if ignored.is_empty() {
        "No extensions are being ignored.".to_string()
    } else {
        let list: Vec<&str> = ignored.iter().map(String::as_str).collect();
        format!("Ignored extensions: {}", list.join(", "))
    }
}

/// Note about tokens that are not a single extension, if there were any
pub fn rejected_tokens_message(rejected: &[String]) -> Option<String> {
    if rejected.is_empty() {
        None
    } else {
        Some(format!(
            "Not a single extension, skipped: {}. Files report only their last extension (e.g. .gz for .tar.gz).",
            rejected.join(", ")
        ))
    }
}

/// Reply to a retraction
pub fn retracted_message(removed: &[String]) -> String {
    if removed.is_empty() {
        "No statistics found for the given extensions.".to_string()
    } else {
        format!("Removed from statistics: {}", removed.join(", "))
    }
}
