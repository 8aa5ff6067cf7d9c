//! Integration Tests
//!
//! End-to-end tests that drive file events through the engine into a real
//! database, including archive extraction and the command-line binary.

#[path = "../common/mod.rs"]
mod common;

mod cli_smoke_test;
mod concurrency;
