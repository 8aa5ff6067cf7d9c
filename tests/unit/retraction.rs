//! Retraction tests through the engine

use anyhow::Result;
use file_stats::database::RecordStore;
use file_stats::notify::{InboundKind, MemorySink, Notifier};
use file_stats::processor::EngineSettings;
use file_stats::types::FileEvent;

use crate::common::engine::test_engine;

#[test]
fn test_retract_category() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;
    let sink = MemorySink::new();
    let notifier = Notifier::for_event(InboundKind::Message, &sink);

    engine.ingest(&FileEvent::new(1, "song.mp3", 400), &notifier)?;
    engine.ingest(&FileEvent::new(1, "other.MP3", 600), &notifier)?;
    engine.ingest(&FileEvent::new(1, "notes.txt", 50), &notifier)?;

    let removed = engine.retract(1, &["MP3", ".flac"])?;
    assert_eq!(removed, vec![".mp3"]);

    let record = engine.get(1)?;
    assert_eq!(record.file_count, 1);
    assert_eq!(record.total_size, 50);
    assert_eq!(record.total_download_size, 50);
    assert!(!record.extension_categories.contains_key(".mp3"));
    Ok(())
}

#[test]
fn test_retract_streamable_category() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;
    let sink = MemorySink::new();
    let notifier = Notifier::for_event(InboundKind::Message, &sink);

    engine.ingest(&FileEvent::new(1, "clip.mp4", 1000), &notifier)?;
    engine.ingest(&FileEvent::new(1, "doc.pdf", 10), &notifier)?;
    assert_eq!(engine.get(1)?.streamable, 1);

    engine.retract(1, &[".mp4"])?;
    let record = engine.get(1)?;
    assert_eq!(record.streamable, 0);
    assert_eq!(record.file_count, 1);
    Ok(())
}

#[test]
fn test_retract_unknown_category_is_noop() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;

    assert!(engine.retract(4, &[".zip"])?.is_empty());
    assert!(!engine.store().exists(4)?);
    Ok(())
}
