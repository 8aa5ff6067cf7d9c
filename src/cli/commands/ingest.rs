use crate::cli::CommandContext;
use crate::errors::{AppError, AppResult};
use crate::notify::{ConsoleSink, InboundKind, Notifier};
use crate::processor::IngestOutcome;
use crate::types::{FileEvent, UserId};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct IngestCommand {
    /// File to aggregate; archives are unpacked
    file: PathBuf,

    /// User the file belongs to
    #[arg(long)]
    user: UserId,

    /// Name to record instead of the file's own name
    #[arg(long)]
    name: Option<String>,

    /// MIME type reported by the transport
    #[arg(long)]
    mime_type: Option<String>,
}

impl IngestCommand {
    pub fn run(&self, ctx: &CommandContext) -> AppResult<()> {
        let metadata = std::fs::metadata(&self.file)?;
        if !metadata.is_file() {
            return Err(AppError::InvalidData(format!(
                "{} is not a regular file",
                self.file.display()
            )));
        }

        let file_name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    AppError::InvalidData(format!("{} has no file name", self.file.display()))
                })?,
        };

        let mut event = FileEvent::new(self.user, file_name, metadata.len())
            .with_location(self.file.to_string_lossy().into_owned());
        if let Some(mime_type) = &self.mime_type {
            event = event.with_mime_type(mime_type.clone());
        }

        let sink = ConsoleSink;
        let notifier = Notifier::for_event(InboundKind::Message, &sink);
        match ctx.engine.ingest(&event, &notifier)? {
            IngestOutcome::Counted { extension } => {
                info!("Counted '{}' as {}", event.file_name, extension)
            }
            IngestOutcome::Ignored { extension } => {
                info!("Ignored '{}' ({})", event.file_name, extension)
            }
            IngestOutcome::Archive {
                processed,
                skipped,
                download_size,
            } => info!(
                "Archive '{}': {} processed, {} skipped, {} bytes downloaded",
                event.file_name, processed, skipped, download_size
            ),
        }
        Ok(())
    }
}
