//! Per-user file statistics for a chat file-intake bot
//!

pub mod archive;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod notify;
pub mod processor;
pub mod report;
pub mod types;
pub mod utils;
