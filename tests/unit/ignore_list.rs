//! Ignore list tests through the engine

use anyhow::Result;
use file_stats::notify::{InboundKind, MemorySink, Notifier};
use file_stats::processor::{rejected_tokens, EngineSettings, IngestOutcome};
use file_stats::types::FileEvent;

use crate::common::engine::test_engine;

#[test]
fn test_tokens_are_normalized() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;

    let added = engine.add_ignored(1, &["EXE", " .Mp3 ", "", "exe"])?;
    assert_eq!(added, vec![".exe", ".mp3"]);

    let ignored: Vec<String> = engine.list_ignored(1)?.into_iter().collect();
    assert_eq!(ignored, vec![".exe", ".mp3"]);
    Ok(())
}

#[test]
fn test_adding_twice_reports_nothing_new() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;

    engine.add_ignored(1, &[".iso"])?;
    assert!(engine.add_ignored(1, &["ISO"])?.is_empty());
    assert_eq!(engine.list_ignored(1)?.len(), 1);
    Ok(())
}

#[test]
fn test_remove_reports_only_present_entries() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;

    engine.add_ignored(1, &[".exe", ".mp3"])?;
    let removed = engine.remove_ignored(1, &["mp3", ".flac"])?;
    assert_eq!(removed, vec![".mp3"]);

    assert!(engine.remove_ignored(1, &[".flac"])?.is_empty());
    assert!(engine.list_ignored(1)?.contains(".exe"));
    Ok(())
}

#[test]
fn test_ignore_lists_are_per_user() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;
    let sink = MemorySink::new();
    let notifier = Notifier::for_event(InboundKind::Message, &sink);

    engine.add_ignored(1, &[".txt"])?;

    let first = engine.ingest(&FileEvent::new(1, "a.txt", 10), &notifier)?;
    let second = engine.ingest(&FileEvent::new(2, "a.txt", 10), &notifier)?;
    assert!(matches!(first, IngestOutcome::Ignored { .. }));
    assert!(matches!(second, IngestOutcome::Counted { .. }));

    assert!(engine.is_empty(1)?);
    assert_eq!(engine.get(2)?.file_count, 1);
    Ok(())
}

#[test]
fn test_unignoring_does_not_restore_history() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;
    let sink = MemorySink::new();
    let notifier = Notifier::for_event(InboundKind::Message, &sink);

    engine.add_ignored(1, &[".log"])?;
    engine.ingest(&FileEvent::new(1, "server.log", 100), &notifier)?;
    engine.remove_ignored(1, &[".log"])?;

    assert!(engine.is_empty(1)?);
    engine.ingest(&FileEvent::new(1, "server.log", 100), &notifier)?;
    assert_eq!(engine.get(1)?.extension_categories[".log"].count, 1);
    Ok(())
}

#[test]
fn test_compound_extension_is_not_stored() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;

    assert!(engine.add_ignored(1, &["tar.gz"])?.is_empty());
    assert!(engine.list_ignored(1)?.is_empty());
    assert_eq!(rejected_tokens(&["tar.gz", "gz"]), vec!["tar.gz"]);
    Ok(())
}
