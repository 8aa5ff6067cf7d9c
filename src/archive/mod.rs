//! Archive detection and extraction.
//!
//! Decompression is delegated to the `zip`, `tar`, `flate2` and `bzip2`
//! crates. Extraction writes every regular file into a scratch directory and
//! reports `(name, relative path, size)` in archive order; aggregation of the
//! result happens in [`crate::processor::batch`].

pub mod transfer;

pub use transfer::TransferResolver;

use crate::errors::{AppError, AppResult};
use crate::types::ExtractedFile;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Container formats the extractor can open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Tar,
    TarGz,
    TarBz2,
}

impl ArchiveFormat {
    /// Format implied by a file name (or a bare suffix such as `.tar.gz`)
    pub fn detect(file_name: &str) -> Option<Self> {
        let name = file_name.to_lowercase();
        if name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") {
            Some(ArchiveFormat::TarBz2)
        } else if name.ends_with(".tar") {
            Some(ArchiveFormat::Tar)
        } else {
            None
        }
    }
}

/// Which file names are routed to the batch processor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePolicy {
    suffixes: Vec<String>,
}

impl Default for ArchivePolicy {
    fn default() -> Self {
        Self {
            suffixes: vec![".zip".to_string()],
        }
    }
}

impl ArchivePolicy {
    /// Build from configured suffixes; every suffix must name a supported format
    pub fn new<S: AsRef<str>>(suffixes: &[S]) -> AppResult<Self> {
        let mut normalized = Vec::with_capacity(suffixes.len());
        for suffix in suffixes {
            let suffix = suffix.as_ref().trim().to_lowercase();
            let suffix = if suffix.starts_with('.') {
                suffix
            } else {
                format!(".{}", suffix)
            };
            if ArchiveFormat::detect(&suffix).is_none() {
                return Err(AppError::Config(format!(
                    "unsupported archive suffix '{}'",
                    suffix
                )));
            }
            if !normalized.contains(&suffix) {
                normalized.push(suffix);
            }
        }
        Ok(Self {
            suffixes: normalized,
        })
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// `Some(format)` if `file_name` is an archive under this policy
    pub fn classify(&self, file_name: &str) -> Option<ArchiveFormat> {
        let name = file_name.to_lowercase();
        if self.suffixes.iter().any(|suffix| name.ends_with(suffix)) {
            ArchiveFormat::detect(&name)
        } else {
            None
        }
    }

    pub fn is_archive(&self, file_name: &str) -> bool {
        self.classify(file_name).is_some()
    }
}

/// Unpacks an archive into a scratch directory
pub trait ArchiveExtractor: Send + Sync {
    fn extract(
        &self,
        format: ArchiveFormat,
        archive: &Path,
        dest: &Path,
    ) -> AppResult<Vec<ExtractedFile>>;
}

/// Extractor backed by the `zip` and `tar` crates
#[derive(Debug, Default, Clone, Copy)]
pub struct ContainerExtractor;

impl ArchiveExtractor for ContainerExtractor {
    fn extract(
        &self,
        format: ArchiveFormat,
        archive: &Path,
        dest: &Path,
    ) -> AppResult<Vec<ExtractedFile>> {
        let file = File::open(archive)?;
        let files = match format {
            ArchiveFormat::Zip => extract_zip(file, archive, dest)?,
            ArchiveFormat::Tar => extract_tar(file, archive, dest)?,
            ArchiveFormat::TarGz => {
                extract_tar(flate2::read::GzDecoder::new(file), archive, dest)?
            }
            ArchiveFormat::TarBz2 => {
                extract_tar(bzip2::read::BzDecoder::new(file), archive, dest)?
            }
        };
        debug!(
            "Extracted {} files from {} ({:?})",
            files.len(),
            archive.display(),
            format
        );
        Ok(files)
    }
}

fn corrupt(archive: &Path, reason: impl std::fmt::Display) -> AppError {
    AppError::CorruptArchive {
        archive: archive.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Decoding failures surface as I/O errors of these kinds; anything else is a local I/O problem
fn classify_io(archive: &Path, err: io::Error) -> AppError {
    match err.kind() {
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof => {
            corrupt(archive, err)
        }
        _ => AppError::Io(err),
    }
}

fn display_name(relative: &Path) -> String {
    relative
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| relative.to_string_lossy().into_owned())
}

fn extract_zip(file: File, archive_path: &Path, dest: &Path) -> AppResult<Vec<ExtractedFile>> {
    let mut archive = zip::ZipArchive::new(file).map_err(|e| corrupt(archive_path, e))?;
    let mut extracted = Vec::with_capacity(archive.len());

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| corrupt(archive_path, e))?;
        if entry.is_dir() {
            continue;
        }
        let Some(relative) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
            warn!(
                "Skipping entry with unsafe path '{}' in {}",
                entry.name(),
                archive_path.display()
            );
            continue;
        };

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        let size = io::copy(&mut entry, &mut out).map_err(|e| classify_io(archive_path, e))?;

        extracted.push(ExtractedFile {
            name: display_name(&relative),
            relative_path: relative,
            size,
        });
    }

    Ok(extracted)
}

fn extract_tar<R: Read>(reader: R, archive_path: &Path, dest: &Path) -> AppResult<Vec<ExtractedFile>> {
    let mut archive = tar::Archive::new(reader);
    let mut extracted = Vec::new();

    let entries = archive
        .entries()
        .map_err(|e| classify_io(archive_path, e))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| classify_io(archive_path, e))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let relative: PathBuf = entry
            .path()
            .map_err(|e| classify_io(archive_path, e))?
            .into_owned();
        let size = entry.size();

        let unpacked = entry
            .unpack_in(dest)
            .map_err(|e| classify_io(archive_path, e))?;
        if !unpacked {
            warn!(
                "Skipping entry with unsafe path '{}' in {}",
                relative.display(),
                archive_path.display()
            );
            continue;
        }

        extracted.push(ExtractedFile {
            name: display_name(&relative),
            relative_path: relative,
            size,
        });
    }

    Ok(extracted)
}
