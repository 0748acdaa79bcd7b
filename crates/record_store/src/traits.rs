//! Store traits - the logical operations the flows are written against

use std::collections::BTreeMap;

use async_trait::async_trait;
use bot_core::record::{AttendanceKey, AttendanceRecord, ScheduleKey, ScheduleRecord};
use bot_core::schema::FieldId;

use crate::Result;

/// The schedule table.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Append a record. Fails with `Duplicate` when the natural key exists.
    async fn insert(&self, record: ScheduleRecord) -> Result<()>;

    /// All records, unordered; callers sort for presentation.
    async fn scan(&self) -> Result<Vec<ScheduleRecord>>;

    /// The record with this natural key, if present.
    async fn find_by_key(&self, key: &ScheduleKey) -> Result<Option<ScheduleRecord>>;

    /// Apply a field patch to the record with this natural key.
    /// Fails with `ScheduleNotFound` when no record matches.
    async fn update_by_key(&self, key: &ScheduleKey, patch: BTreeMap<FieldId, String>)
        -> Result<()>;

    /// Remove the record with this natural key.
    /// Fails with `ScheduleNotFound` when no record matches.
    async fn delete_by_key(&self, key: &ScheduleKey) -> Result<()>;
}

/// The attendance table.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Insert or replace the row with the record's natural key.
    async fn upsert_by_key(&self, record: AttendanceRecord) -> Result<()>;

    /// All rows, unordered; callers sort for presentation.
    async fn scan(&self) -> Result<Vec<AttendanceRecord>>;

    /// The row with this natural key, if present.
    async fn find_by_key(&self, key: &AttendanceKey) -> Result<Option<AttendanceRecord>>;

    /// Remove the row with this natural key.
    /// Fails with `AttendanceNotFound` when no row matches.
    async fn delete_by_key(&self, key: &AttendanceKey) -> Result<()>;
}
