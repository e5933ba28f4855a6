// src/quiz/snapshot.rs

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::flag::{FlagRecord, WorkingSet};

/// Latest working set, shared by every session.
///
/// Reloading unchanged rows hands back the existing snapshot, so sessions hold
/// references to one copy of the table instead of one copy each.
#[derive(Clone, Default)]
pub struct SharedWorkingSet {
    current: Arc<RwLock<WorkingSet>>,
}

impl SharedWorkingSet {
    /// Replaces the snapshot with `records` unless they match the current one.
    pub fn refresh(&self, records: Vec<FlagRecord>) -> WorkingSet {
        {
            let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
            if current.records() == records.as_slice() {
                return current.clone();
            }
        }

        let fresh = WorkingSet::from(records);
        tracing::info!("Flag snapshot replaced ({} records)", fresh.len());
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = fresh.clone();
        fresh
    }

    pub fn current(&self) -> WorkingSet {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
