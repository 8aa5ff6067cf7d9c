//! Per-user critical sections.
//!
//! Every mutation is a read-modify-write of one user's record. Holding the
//! user's mutex for the whole cycle prevents lost updates when events for the
//! same user are handled concurrently; different users never contend.
//!
//! A slot lives only while some thread holds or waits for it, so the map is
//! bounded by the number of users with work in flight.

use crate::types::UserId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct UserLocks {
    slots: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<UserId, Arc<Mutex<()>>>> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn slot(&self, user_id: UserId) -> Arc<Mutex<()>> {
        Arc::clone(self.slots().entry(user_id).or_default())
    }

    /// Drop the slot unless another thread still holds a handle to it
    fn release(&self, user_id: UserId, slot: Arc<Mutex<()>>) {
        let mut slots = self.slots();
        // One reference in the map, one in `slot`
        if Arc::strong_count(&slot) == 2 {
            slots.remove(&user_id);
        }
    }

    /// Run `f` while holding `user_id`'s lock
    pub fn with_user<T>(&self, user_id: UserId, f: impl FnOnce() -> T) -> T {
        let slot = self.slot(user_id);
        let result = {
            // The lock guards no data, so a poisoned lock is still usable
            let _guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            f()
        };
        self.release(user_id, slot);
        result
    }

    /// Number of users with a holder or waiter right now
    pub fn tracked_users(&self) -> usize {
        self.slots().len()
    }
}
