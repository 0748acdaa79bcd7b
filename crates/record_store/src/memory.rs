//! In-memory record store
//!
//! Backs both tables with vectors behind an async RwLock. Used by the test
//! suites and by deployments that accept losing records on restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use bot_core::record::{AttendanceKey, AttendanceRecord, ScheduleKey, ScheduleRecord};
use bot_core::schema::FieldId;
use tokio::sync::RwLock;

use crate::error::RecordStoreError;
use crate::traits::{AttendanceStore, ScheduleStore};
use crate::Result;

#[derive(Default)]
pub struct InMemoryRecordStore {
    schedules: RwLock<Vec<ScheduleRecord>>,
    attendance: RwLock<Vec<AttendanceRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryRecordStore {
    async fn insert(&self, record: ScheduleRecord) -> Result<()> {
        let mut schedules = self.schedules.write().await;
        if schedules.iter().any(|r| r.key() == record.key()) {
            return Err(RecordStoreError::Duplicate(record.key()));
        }
        schedules.push(record);
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<ScheduleRecord>> {
        Ok(self.schedules.read().await.clone())
    }

    async fn find_by_key(&self, key: &ScheduleKey) -> Result<Option<ScheduleRecord>> {
        Ok(self
            .schedules
            .read()
            .await
            .iter()
            .find(|r| &r.key() == key)
            .cloned())
    }

    async fn update_by_key(
        &self,
        key: &ScheduleKey,
        patch: BTreeMap<FieldId, String>,
    ) -> Result<()> {
        let mut schedules = self.schedules.write().await;
        let record = schedules
            .iter_mut()
            .find(|r| &r.key() == key)
            .ok_or_else(|| RecordStoreError::ScheduleNotFound(key.clone()))?;
        record
            .apply_patch(&patch)
            .map_err(|e| RecordStoreError::InvalidPatch(e.to_string()))?;
        Ok(())
    }

    async fn delete_by_key(&self, key: &ScheduleKey) -> Result<()> {
        let mut schedules = self.schedules.write().await;
        let before = schedules.len();
        schedules.retain(|r| &r.key() != key);
        if schedules.len() == before {
            return Err(RecordStoreError::ScheduleNotFound(key.clone()));
        }
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for InMemoryRecordStore {
    async fn upsert_by_key(&self, record: AttendanceRecord) -> Result<()> {
        let mut attendance = self.attendance.write().await;
        if let Some(existing) = attendance.iter_mut().find(|r| r.key() == record.key()) {
            *existing = record;
        } else {
            attendance.push(record);
        }
        Ok(())
    }

    async fn scan(&self) -> Result<Vec<AttendanceRecord>> {
        Ok(self.attendance.read().await.clone())
    }

    async fn find_by_key(&self, key: &AttendanceKey) -> Result<Option<AttendanceRecord>> {
        Ok(self
            .attendance
            .read()
            .await
            .iter()
            .find(|r| &r.key() == key)
            .cloned())
    }

    async fn delete_by_key(&self, key: &AttendanceKey) -> Result<()> {
        let mut attendance = self.attendance.write().await;
        let before = attendance.len();
        attendance.retain(|r| &r.key() != key);
        if attendance.len() == before {
            return Err(RecordStoreError::AttendanceNotFound(key.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_core::status::AttendanceStatus;
    use chrono::NaiveDate;

    fn schedule(date: (i32, u32, u32), title: &str) -> ScheduleRecord {
        ScheduleRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title: title.to_string(),
            time: "10:00".to_string(),
            location: "Meeting Room A".to_string(),
            detail: "details".to_string(),
            deadline: None,
            scale: None,
        }
    }

    fn attendance(date: (i32, u32, u32), title: &str, user: &str) -> AttendanceRecord {
        AttendanceRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            title: title.to_string(),
            participant_id: user.to_string(),
            display_name: format!("{user} name"),
            status: AttendanceStatus::Attending,
            remarks: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_natural_key() {
        let store = InMemoryRecordStore::new();
        store.insert(schedule((2025, 6, 15), "Kickoff")).await.unwrap();
        let err = store
            .insert(schedule((2025, 6, 15), "Kickoff"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordStoreError::Duplicate(_)));
        assert_eq!(ScheduleStore::scan(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_key_lookup_is_pair_based_not_column_based() {
        let store = InMemoryRecordStore::new();
        // Same date, different titles; same title, different dates.
        store.insert(schedule((2025, 6, 15), "Kickoff")).await.unwrap();
        store.insert(schedule((2025, 6, 15), "Review")).await.unwrap();
        store.insert(schedule((2025, 6, 20), "Kickoff")).await.unwrap();

        let key = ScheduleKey::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), "Review");
        ScheduleStore::delete_by_key(&store, &key).await.unwrap();

        let remaining = ScheduleStore::scan(&store).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|r| r.key() != key));
    }

    #[tokio::test]
    async fn test_update_by_key_patches_single_field() {
        let store = InMemoryRecordStore::new();
        store.insert(schedule((2025, 6, 15), "Kickoff")).await.unwrap();
        let key = ScheduleKey::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), "Kickoff");
        store
            .update_by_key(&key, BTreeMap::from([(FieldId::Location, "Online".to_string())]))
            .await
            .unwrap();
        let found = ScheduleStore::find_by_key(&store, &key)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.location, "Online");
        assert_eq!(found.time, "10:00");
    }

    #[tokio::test]
    async fn test_update_missing_key_reports_not_found() {
        let store = InMemoryRecordStore::new();
        let key = ScheduleKey::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), "Ghost");
        let err = store
            .update_by_key(&key, BTreeMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RecordStoreError::ScheduleNotFound(_)));
    }

    #[tokio::test]
    async fn test_attendance_upsert_replaces_existing_row() {
        let store = InMemoryRecordStore::new();
        store
            .upsert_by_key(attendance((2025, 6, 15), "Kickoff", "user-1"))
            .await
            .unwrap();

        let mut updated = attendance((2025, 6, 15), "Kickoff", "user-1");
        updated.status = AttendanceStatus::Tentative;
        updated.remarks = "may be late".to_string();
        store.upsert_by_key(updated).await.unwrap();

        let rows = AttendanceStore::scan(&store).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Tentative);
        assert_eq!(rows[0].remarks, "may be late");
    }

    #[tokio::test]
    async fn test_attendance_delete_by_key() {
        let store = InMemoryRecordStore::new();
        store
            .upsert_by_key(attendance((2025, 6, 15), "Kickoff", "user-1"))
            .await
            .unwrap();
        store
            .upsert_by_key(attendance((2025, 6, 15), "Kickoff", "user-2"))
            .await
            .unwrap();

        let key = AttendanceKey::new(
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            "Kickoff",
            "user-1",
        );
        AttendanceStore::delete_by_key(&store, &key).await.unwrap();
        let rows = AttendanceStore::scan(&store).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participant_id, "user-2");

        let err = AttendanceStore::delete_by_key(&store, &key)
            .await
            .unwrap_err();
        assert!(matches!(err, RecordStoreError::AttendanceNotFound(_)));
    }
}
