//! Mapping delivered file locations to local paths.
//!
//! A self-hosted bot API server reports file paths such as
//! `/var/lib/telegram-bot-api/<token>/documents/file_3.zip` while the bot sees
//! the same file under its own data directory. Only the last three segments
//! (`<token>/<folder>/<file>`) are meaningful.

use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

pub const DEFAULT_LOCAL_DATA_DIR: &str = "api/telegram-bot-api-data";

#[derive(Debug, Clone)]
pub struct TransferResolver {
    local_data_dir: PathBuf,
}

impl Default for TransferResolver {
    fn default() -> Self {
        Self::new(DEFAULT_LOCAL_DATA_DIR)
    }
}

impl TransferResolver {
    pub fn new(local_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            local_data_dir: local_data_dir.into(),
        }
    }

    /// Local path of a delivered file.
    ///
    /// Existing paths are used as they are; anything else is treated as a bot
    /// API file path and re-rooted under the local data directory.
    pub fn resolve(&self, location: Option<&str>) -> AppResult<PathBuf> {
        let location = location
            .map(str::trim)
            .filter(|location| !location.is_empty())
            .ok_or_else(|| {
                AppError::TransferPathUnresolved("no file location delivered".to_string())
            })?;

        let direct = Path::new(location);
        if direct.is_file() {
            return Ok(direct.to_path_buf());
        }

        let segments: Vec<&str> = location.split('/').filter(|s| !s.is_empty()).collect();
        let tail = match segments.as_slice() {
            [.., token, folder, file] => [*token, *folder, *file],
            _ => {
                return Err(AppError::TransferPathUnresolved(format!(
                    "cannot parse file path '{}'",
                    location
                )))
            }
        };
        if tail.iter().any(|segment| *segment == "." || *segment == "..") {
            return Err(AppError::TransferPathUnresolved(format!(
                "relative segments in file path '{}'",
                location
            )));
        }

        let candidate = tail
            .iter()
            .fold(self.local_data_dir.clone(), |path, segment| path.join(segment));
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(AppError::TransferPathUnresolved(format!(
                "'{}' not found at {}",
                location,
                candidate.display()
            )))
        }
    }
}
