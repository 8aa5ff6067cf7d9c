//! Record store abstraction.
//!
//! Aggregation, ignore-list and retraction code only talk to this trait, so an
//! explicit store instance is injected everywhere instead of a shared handle.

use crate::errors::AppResult;
use crate::types::{UserId, UserStatsRecord};

/// What a reset does with the user's ignore list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Reset wipes the ignore list together with the counters
    #[default]
    ClearIgnored,
    /// Reset keeps the ignore list
    KeepIgnored,
}

impl ResetPolicy {
    pub fn from_clear_flag(clear_ignored: bool) -> Self {
        if clear_ignored {
            ResetPolicy::ClearIgnored
        } else {
            ResetPolicy::KeepIgnored
        }
    }
}

/// Durable keyed storage of statistics records
///
/// Every write is committed before returning; a `put` followed by a `get` for
/// the same user observes the new value.
pub trait RecordStore {
    /// Record for `user_id`, or the zero record if none is stored
    fn get(&self, user_id: UserId) -> AppResult<UserStatsRecord>;

    /// Upsert the full record
    fn put(&self, user_id: UserId, record: &UserStatsRecord) -> AppResult<()>;

    /// Overwrite the record with the zero record
    fn reset(&self, user_id: UserId, policy: ResetPolicy) -> AppResult<()>;

    /// True iff no statistics are stored; ignore lists don't count
    fn is_empty(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.get(user_id)?.is_empty())
    }

    /// Whether a row exists for `user_id`
    fn exists(&self, user_id: UserId) -> AppResult<bool>;

    /// Remove the row; returns whether one existed
    fn delete(&self, user_id: UserId) -> AppResult<bool>;

    /// Number of stored users
    fn count(&self) -> AppResult<u64>;

    /// All stored user ids in ascending order
    fn user_ids(&self) -> AppResult<Vec<UserId>>;
}
