//! File statistics type system
//!
//! - `event`: inbound file events (transport deliveries, extracted archive entries)
//! - `record`: the per-user statistics record and its persisted JSON shapes

pub mod event;
pub mod record;

pub use event::{ExtractedFile, FileArrival, FileEvent, UserId};
pub use record::{ExtensionStats, UserStatsRecord};
