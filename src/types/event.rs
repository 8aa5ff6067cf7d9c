//! Inbound file events as delivered by the transport and the extractor.

use std::path::PathBuf;

/// Integer user identifier issued by the chat platform
pub type UserId = i64;

/// One file arriving from the chat transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub user_id: UserId,
    pub file_name: String,
    pub file_size: u64,
    /// Best-effort MIME type reported by the transport
    pub mime_type: Option<String>,
    /// Where the transport stored the payload; only needed for archives
    pub location: Option<String>,
}

impl FileEvent {
    pub fn new(user_id: UserId, file_name: impl Into<String>, file_size: u64) -> Self {
        Self {
            user_id,
            file_name: file_name.into(),
            file_size,
            mime_type: None,
            location: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn arrival(&self) -> FileArrival<'_> {
        FileArrival {
            name: &self.file_name,
            size: self.file_size,
            mime_type: self.mime_type.as_deref(),
        }
    }
}

/// The slice of an event the aggregator needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileArrival<'a> {
    pub name: &'a str,
    pub size: u64,
    pub mime_type: Option<&'a str>,
}

impl<'a> FileArrival<'a> {
    pub fn new(name: &'a str, size: u64) -> Self {
        Self {
            name,
            size,
            mime_type: None,
        }
    }

    /// Video check on the reported MIME type, falling back to a guess from the name
    pub fn is_video(&self) -> bool {
        let mime = match self.mime_type {
            Some(mime) => Some(mime),
            None => mime_guess::from_path(self.name).first_raw(),
        };
        mime.is_some_and(|mime| mime.starts_with("video"))
    }
}

/// A file written to the scratch directory while unpacking an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    pub name: String,
    pub relative_path: PathBuf,
    pub size: u64,
}

impl ExtractedFile {
    pub fn arrival(&self) -> FileArrival<'_> {
        FileArrival::new(&self.name, self.size)
    }
}
