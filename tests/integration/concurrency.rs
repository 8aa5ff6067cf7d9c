//! Concurrent events for one user must not lose updates

use anyhow::Result;
use file_stats::notify::{InboundKind, MemorySink, Notifier};
use file_stats::processor::EngineSettings;
use file_stats::types::FileEvent;

use crate::common::engine::test_engine;

const THREADS: u64 = 8;
const FILES_PER_THREAD: u64 = 10;

#[test]
fn test_same_user_events_are_all_counted() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;
    let sink = MemorySink::new();

    std::thread::scope(|scope| {
        for thread in 0..THREADS {
            let engine = &engine;
            let sink = &sink;
            scope.spawn(move || {
                let notifier = Notifier::for_event(InboundKind::Message, sink);
                for n in 0..FILES_PER_THREAD {
                    let event = FileEvent::new(1, format!("t{}_{}.bin", thread, n), 10);
                    engine.ingest(&event, &notifier).unwrap();
                }
            });
        }
    });

    let record = engine.get(1)?;
    assert_eq!(record.file_count, THREADS * FILES_PER_THREAD);
    assert_eq!(record.total_size, THREADS * FILES_PER_THREAD * 10);
    assert_eq!(
        record.extension_categories[".bin"].count,
        THREADS * FILES_PER_THREAD
    );
    assert_eq!(sink.messages().len() as u64, THREADS * FILES_PER_THREAD);
    Ok(())
}

#[test]
fn test_users_are_independent() -> Result<()> {
    let (engine, _db) = test_engine(EngineSettings::default())?;
    let sink = MemorySink::new();

    std::thread::scope(|scope| {
        for user_id in 1..=4 {
            let engine = &engine;
            let sink = &sink;
            scope.spawn(move || {
                let notifier = Notifier::for_event(InboundKind::Message, sink);
                for n in 0..5 {
                    let event = FileEvent::new(user_id, format!("doc{}.pdf", n), 100);
                    engine.ingest(&event, &notifier).unwrap();
                }
            });
        }
    });

    for user_id in 1..=4 {
        assert_eq!(engine.get(user_id)?.file_count, 5);
    }
    Ok(())
}
