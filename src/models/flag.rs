// src/models/flag.rs

use std::sync::Arc;

use serde::Serialize;
use sqlx::prelude::FromRow;

/// Represents a row of the 'flags' table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct FlagRecord {
    pub id: i32,

    /// Country display name; submitted answers are compared against it.
    pub name: String,

    /// Opaque reference to the flag image (path, URL or emoji).
    pub flag: String,
}

impl FlagRecord {
    pub fn new(id: i32, name: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            flag: flag.into(),
        }
    }
}

/// Immutable snapshot of the flags table used to build questions.
///
/// Cloning shares the underlying records. A reload builds a new set rather
/// than modifying an existing one.
#[derive(Debug, Clone, Default)]
pub struct WorkingSet {
    records: Arc<[FlagRecord]>,
}

impl WorkingSet {
    pub fn records(&self) -> &[FlagRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True when both sets point at the same underlying records.
    pub fn shares_records_with(&self, other: &WorkingSet) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl From<Vec<FlagRecord>> for WorkingSet {
    fn from(records: Vec<FlagRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }
}
