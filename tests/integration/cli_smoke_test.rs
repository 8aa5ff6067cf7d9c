//! CLI Smoke Test
//!
//! Runs the built binary against a temporary database and checks that the
//! commands cooperate through the stored state.

use anyhow::Result;
use std::path::Path;
use std::process::{Command, Output};

use crate::common::fixtures::{bytes, write_zip};

fn file_stats(database: &Path, args: &[&str]) -> Result<Output> {
    let output = Command::new(env!("CARGO_BIN_EXE_file-stats"))
        .arg("--database-path")
        .arg(database)
        .args(args)
        .env_remove("DATABASE_FILE")
        .env_remove("DEBUG_MODE")
        .env_remove("FILESTATS_DATABASE__PATH")
        .output()?;
    assert!(
        output.status.success(),
        "file-stats {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    Ok(output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_round_trip() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let database = dir.path().join("stats.db");

    let archive = write_zip(
        &dir.path().join("bundle.zip"),
        &[("a.txt", bytes(10)), ("b.exe", bytes(20))],
    )?;
    let archive_arg = archive.to_string_lossy().into_owned();

    let out = file_stats(&database, &["ignore", "--user", "9", "add", "EXE", "tar.gz"])?;
    let text = stdout(&out);
    assert!(text.contains("Added to ignore list: .exe"));
    assert!(text.contains("Not a single extension, skipped: tar.gz."));

    let out = file_stats(&database, &["ingest", &archive_arg, "--user", "9"])?;
    let text = stdout(&out);
    assert!(text.contains("File received via archive: 'a.txt' (10 Bytes)."));
    assert!(text.contains("Skipped 1 file inside the archive"));

    let out = file_stats(&database, &["stats", "--user", "9", "--json"])?;
    let report: serde_json::Value = serde_json::from_str(&stdout(&out))?;
    assert_eq!(report["file_count"], 1);
    assert_eq!(report["ignored_extensions"][0], ".exe");

    let out = file_stats(&database, &["forget", "txt", "--user", "9"])?;
    assert!(stdout(&out).contains("Removed from statistics: .txt"));

    let out = file_stats(&database, &["users"])?;
    assert!(stdout(&out).starts_with("1 users"));

    file_stats(&database, &["reset", "--user", "9"])?;
    let out = file_stats(&database, &["stats", "--user", "9"])?;
    assert!(stdout(&out).contains("No files uploaded yet."));
    Ok(())
}
