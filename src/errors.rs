use thiserror::Error;

use crate::types::UserId;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Persistence unreachable or corrupt
    #[error("Storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Archive could not be opened or read by the extractor
    #[error("Corrupt archive '{archive}': {reason}")]
    CorruptArchive { archive: String, reason: String },

    /// Delivered file location could not be mapped to a local path
    #[error("Transfer path unresolved: {0}")]
    TransferPathUnresolved(String),

    /// Persisted row does not parse into a statistics record
    #[error("Invalid record shape for user {user_id}: {reason}")]
    InvalidRecordShape { user_id: UserId, reason: String },

    /// Archive uploads are switched off in this deployment
    #[error("Archives are not supported in this mode: {0}")]
    ArchivesDisabled(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Coarse failure classification used in log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    StorageFailure,
    CorruptArchive,
    TransferPathUnresolved,
    InvalidRecordShape,
    ArchivesDisabled,
    Io,
    Config,
    InvalidData,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::StorageFailure => "StorageFailure",
            ErrorKind::CorruptArchive => "CorruptArchive",
            ErrorKind::TransferPathUnresolved => "TransferPathUnresolved",
            ErrorKind::InvalidRecordShape => "InvalidRecordShape",
            ErrorKind::ArchivesDisabled => "ArchivesDisabled",
            ErrorKind::Io => "Io",
            ErrorKind::Config => "Config",
            ErrorKind::InvalidData => "InvalidData",
        };
        f.write_str(name)
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Storage(_) => ErrorKind::StorageFailure,
            AppError::CorruptArchive { .. } => ErrorKind::CorruptArchive,
            AppError::TransferPathUnresolved(_) => ErrorKind::TransferPathUnresolved,
            AppError::InvalidRecordShape { .. } => ErrorKind::InvalidRecordShape,
            AppError::ArchivesDisabled(_) => ErrorKind::ArchivesDisabled,
            AppError::Io(_) => ErrorKind::Io,
            AppError::Config(_) => ErrorKind::Config,
            AppError::InvalidData(_) => ErrorKind::InvalidData,
        }
    }

    /// Message safe to show to a chat user. Never includes internal detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::CorruptArchive { .. } => "Error handling archive file.",
            AppError::ArchivesDisabled(_) => "Archives are not supported in this mode.",
            _ => "Error handling file.",
        }
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
