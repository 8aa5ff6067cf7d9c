//! Aggregation of file events into per-user statistics.
//!
//! The free functions in the submodules operate on a [`RecordStore`] and a
//! single record; [`StatsEngine`] ties them together behind per-user locks.
//!
//! [`RecordStore`]: crate::database::RecordStore

pub mod aggregator;
pub mod batch;
pub mod engine;
pub mod ignore_list;
pub mod locks;
pub mod retraction;

pub use aggregator::{extension_of, Aggregation};
pub use batch::{process_batch, BatchOutcome};
pub use engine::{EngineSettings, IngestOutcome, StatsEngine};
pub use ignore_list::{normalize_extension, rejected_tokens};
pub use locks::UserLocks;
