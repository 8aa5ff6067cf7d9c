//! Unit Tests
//!
//! Component-level tests against a real temporary database.

#[path = "../common/mod.rs"]
mod common;

mod ignore_list;
mod retraction;
mod store_operations;
