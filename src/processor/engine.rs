//! Entry points used by the presentation layer.
//!
//! `StatsEngine` owns the injected record store and runs every mutating
//! operation inside the user's critical section (see [`UserLocks`]).

use super::aggregator::{self, extension_of, Aggregation};
use super::batch::{self, BatchOutcome};
use super::ignore_list;
use super::locks::UserLocks;
use super::retraction;
use crate::archive::{ArchiveExtractor, ArchiveFormat, ArchivePolicy, ContainerExtractor, TransferResolver};
use crate::config::AppConfig;
use crate::database::{RecordStore, ResetPolicy};
use crate::errors::{AppError, AppResult};
use crate::notify::Notifier;
use crate::report::StatsReport;
use crate::types::{FileEvent, UserId, UserStatsRecord};
use crate::utils::format::format_bytes;
use std::collections::BTreeSet;
use tracing::{debug, error, info, warn};

/// Behaviour switches taken from configuration
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub archives: ArchivePolicy,
    pub archives_enabled: bool,
    pub reset_policy: ResetPolicy,
    pub transfer: TransferResolver,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            archives: ArchivePolicy::default(),
            archives_enabled: true,
            reset_policy: ResetPolicy::ClearIgnored,
            transfer: TransferResolver::default(),
        }
    }
}

impl EngineSettings {
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            archives: ArchivePolicy::new(&config.ingest.archive_suffixes)?,
            archives_enabled: config.ingest.archives_enabled,
            reset_policy: ResetPolicy::from_clear_flag(config.stats.reset_clears_ignored),
            transfer: TransferResolver::new(&config.transfer.local_data_dir),
        })
    }
}

/// What happened to one delivered file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Counted { extension: String },
    Ignored { extension: String },
    Archive {
        processed: u64,
        skipped: u64,
        download_size: u64,
    },
}

pub struct StatsEngine<S: RecordStore> {
    store: S,
    settings: EngineSettings,
    extractor: Box<dyn ArchiveExtractor>,
    locks: UserLocks,
}

impl<S: RecordStore> StatsEngine<S> {
    pub fn new(store: S, settings: EngineSettings) -> Self {
        Self {
            store,
            settings,
            extractor: Box::new(ContainerExtractor),
            locks: UserLocks::new(),
        }
    }

    /// Replace the archive extractor
    pub fn with_extractor(mut self, extractor: impl ArchiveExtractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Aggregate one delivered file, archive or not.
    ///
    /// On failure the user gets a generic notification and the error is
    /// returned; entries of a batch committed before the failure stay committed.
    /// Undeliverable notifications are logged and never fail the call.
    pub fn ingest(&self, event: &FileEvent, notifier: &Notifier<'_>) -> AppResult<IngestOutcome> {
        let result = self
            .locks
            .with_user(event.user_id, || self.ingest_locked(event, notifier));

        if let Err(e) = &result {
            error!(
                "Error handling file '{}' for user {} [{}]: {}",
                event.file_name,
                event.user_id,
                e.kind(),
                e
            );
            notifier.send_or_warn(e.user_message());
        }
        result
    }

    fn ingest_locked(&self, event: &FileEvent, notifier: &Notifier<'_>) -> AppResult<IngestOutcome> {
        match self.settings.archives.classify(&event.file_name) {
            Some(format) => self.ingest_archive(event, format, notifier),
            None => self.ingest_standalone(event, notifier),
        }
    }

    fn ingest_standalone(
        &self,
        event: &FileEvent,
        notifier: &Notifier<'_>,
    ) -> AppResult<IngestOutcome> {
        debug!(
            "Processing file: '{}' ({})",
            event.file_name,
            format_bytes(event.file_size)
        );
        let mut record = self.store.get(event.user_id)?;

        match aggregator::apply_standalone(&mut record, &event.arrival()) {
            Aggregation::Ignored { extension } => {
                self.report_ignored(event, &extension, notifier);
                Ok(IngestOutcome::Ignored { extension })
            }
            Aggregation::Counted { extension } => {
                self.store.put(event.user_id, &record)?;
                notifier.send_or_warn(&format!(
                    "File received: '{}' ({})",
                    event.file_name,
                    format_bytes(event.file_size)
                ));
                Ok(IngestOutcome::Counted { extension })
            }
        }
    }

    fn ingest_archive(
        &self,
        event: &FileEvent,
        format: ArchiveFormat,
        notifier: &Notifier<'_>,
    ) -> AppResult<IngestOutcome> {
        if !self.settings.archives_enabled {
            warn!("Archives are not supported in this mode ('{}')", event.file_name);
            return Err(AppError::ArchivesDisabled(event.file_name.clone()));
        }

        let mut record = self.store.get(event.user_id)?;
        let extension = extension_of(&event.file_name);
        if record.is_ignored(&extension) {
            self.report_ignored(event, &extension, notifier);
            return Ok(IngestOutcome::Ignored { extension });
        }

        notifier.send_or_warn(&format!(
            "Processing archive: '{}'... This may take some time.",
            event.file_name
        ));
        debug!(
            "Processing archive: '{}' ({})",
            event.file_name,
            format_bytes(event.file_size)
        );

        let archive_path = self.settings.transfer.resolve(event.location.as_deref())?;
        let scratch = tempfile::tempdir()?;
        let files = self
            .extractor
            .extract(format, &archive_path, scratch.path())?;

        let BatchOutcome { processed, skipped } =
            batch::process_batch(&self.store, event.user_id, &mut record, &files, notifier)?;

        let download_size = std::fs::metadata(&archive_path)?.len();
        record.total_download_size = record.total_download_size.saturating_add(download_size);
        self.store.put(event.user_id, &record)?;

        info!(
            "User {}: archive '{}' added {} files ({} skipped)",
            event.user_id, event.file_name, processed, skipped
        );
        notifier.send_or_warn(&format!("Archive received: '{}'.", event.file_name));

        Ok(IngestOutcome::Archive {
            processed,
            skipped,
            download_size,
        })
    }

    fn report_ignored(&self, event: &FileEvent, extension: &str, notifier: &Notifier<'_>) {
        info!(
            "File '{}' from user {} ignored due to its extension ({}).",
            event.file_name, event.user_id, extension
        );
        notifier.send_or_warn(&format!(
            "File '{}' ignored due to its extension ({}).",
            event.file_name, extension
        ));
    }

    pub fn get(&self, user_id: UserId) -> AppResult<UserStatsRecord> {
        self.store.get(user_id)
    }

    pub fn report(&self, user_id: UserId) -> AppResult<StatsReport> {
        Ok(StatsReport::from_record(user_id, &self.store.get(user_id)?))
    }

    pub fn is_empty(&self, user_id: UserId) -> AppResult<bool> {
        self.store.is_empty(user_id)
    }

    pub fn reset(&self, user_id: UserId) -> AppResult<()> {
        self.locks.with_user(user_id, || {
            self.store.reset(user_id, self.settings.reset_policy)
        })?;
        info!("Statistics reset for user {}", user_id);
        Ok(())
    }

    pub fn add_ignored<T: AsRef<str>>(&self, user_id: UserId, tokens: &[T]) -> AppResult<Vec<String>> {
        self.locks
            .with_user(user_id, || ignore_list::add_ignored(&self.store, user_id, tokens))
    }

    pub fn remove_ignored<T: AsRef<str>>(
        &self,
        user_id: UserId,
        tokens: &[T],
    ) -> AppResult<Vec<String>> {
        self.locks
            .with_user(user_id, || ignore_list::remove_ignored(&self.store, user_id, tokens))
    }

    pub fn list_ignored(&self, user_id: UserId) -> AppResult<BTreeSet<String>> {
        ignore_list::list_ignored(&self.store, user_id)
    }

    /// Forget whole extension categories; returns the ones that were present
    pub fn retract<T: AsRef<str>>(&self, user_id: UserId, tokens: &[T]) -> AppResult<Vec<String>> {
        self.locks
            .with_user(user_id, || retraction::retract(&self.store, user_id, tokens))
    }
}
