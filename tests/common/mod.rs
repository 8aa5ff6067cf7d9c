//! Common Test Utilities
//!
//! Shared helpers for the unit and integration test binaries: temporary
//! databases, engines wired to them, and archive fixtures.

#![allow(dead_code)]

/// Database setup and teardown utilities
pub mod database {
    use file_stats::database::Database;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Test database living in its own temporary directory
    ///
    /// The directory (and the WAL side files) are removed on drop.
    pub struct TestDatabase {
        pub db: Database,
        dir: TempDir,
    }

    impl TestDatabase {
        pub fn new() -> anyhow::Result<Self> {
            let dir = tempfile::tempdir()?;
            let db = Database::new(dir.path().join("file_statistics.db"))?;
            Ok(TestDatabase { db, dir })
        }

        pub fn path(&self) -> &Path {
            self.db.path()
        }

        /// Scratch directory next to the database, for fixtures
        pub fn dir(&self) -> &Path {
            self.dir.path()
        }

        pub fn fixture_path(&self, name: &str) -> PathBuf {
            self.dir.path().join(name)
        }

        pub fn database(&self) -> &Database {
            &self.db
        }

        /// Raw connection for seeding rows the public API cannot produce
        pub fn raw_connection(&self) -> anyhow::Result<rusqlite::Connection> {
            Ok(self.db.connect()?)
        }
    }
}

/// Engine wiring
pub mod engine {
    use super::database::TestDatabase;
    use file_stats::processor::{EngineSettings, StatsEngine};
    use file_stats::database::Database;

    /// Engine over a fresh database; keep the `TestDatabase` alive for the test's duration
    pub fn test_engine(settings: EngineSettings) -> anyhow::Result<(StatsEngine<Database>, TestDatabase)> {
        let test_db = TestDatabase::new()?;
        let engine = StatsEngine::new(test_db.database().clone(), settings);
        Ok((engine, test_db))
    }
}

/// Test fixture utilities
pub mod fixtures {
    use std::fs::File;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    /// Write a zip archive with the given `(name, content)` entries in order
    pub fn write_zip(path: &Path, entries: &[(&str, Vec<u8>)]) -> anyhow::Result<PathBuf> {
        let mut writer = zip::ZipWriter::new(File::create(path)?);
        for (name, content) in entries {
            writer.start_file(*name, zip::write::SimpleFileOptions::default())?;
            writer.write_all(content)?;
        }
        writer.finish()?;
        Ok(path.to_path_buf())
    }

    /// Write a gzip-compressed tar archive with the given entries in order
    pub fn write_tar_gz(path: &Path, entries: &[(&str, Vec<u8>)]) -> anyhow::Result<PathBuf> {
        let encoder =
            flate2::write::GzEncoder::new(File::create(path)?, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, content) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(content.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, content.as_slice())?;
        }
        builder.into_inner()?.finish()?;
        Ok(path.to_path_buf())
    }

    /// `len` bytes of filler
    pub fn bytes(len: usize) -> Vec<u8> {
        vec![b'x'; len]
    }
}
