//! JSON-file record store
//!
//! Persists each logical table as one JSON file under a base directory
//! (`schedules.json`, `attendance.json`). Tables are held in memory behind a
//! mutex and written back after every mutation, so a restart reloads the last
//! committed state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bot_core::record::{AttendanceKey, AttendanceRecord, ScheduleKey, ScheduleRecord};
use bot_core::schema::FieldId;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use crate::error::RecordStoreError;
use crate::traits::{AttendanceStore, ScheduleStore};
use crate::Result;

const SCHEDULES_FILE: &str = "schedules.json";
const ATTENDANCE_FILE: &str = "attendance.json";

pub struct JsonFileRecordStore {
    base_dir: PathBuf,
    schedules: Mutex<Vec<ScheduleRecord>>,
    attendance: Mutex<Vec<AttendanceRecord>>,
}

impl JsonFileRecordStore {
    /// Open the store, loading any existing table files.
    pub async fn open(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir).await?;
        }
        let schedules = load_table(&base_dir.join(SCHEDULES_FILE)).await?;
        let attendance = load_table(&base_dir.join(ATTENDANCE_FILE)).await?;
        tracing::info!(
            path = %base_dir.display(),
            schedules = schedules.len(),
            attendance = attendance.len(),
            "JsonFileRecordStore: tables loaded"
        );
        Ok(Self {
            base_dir,
            schedules: Mutex::new(schedules),
            attendance: Mutex::new(attendance),
        })
    }

    async fn persist_schedules(&self, table: &[ScheduleRecord]) -> Result<()> {
        persist_table(&self.base_dir.join(SCHEDULES_FILE), table).await
    }

    async fn persist_attendance(&self, table: &[AttendanceRecord]) -> Result<()> {
        persist_table(&self.base_dir.join(ATTENDANCE_FILE), table).await
    }
}

async fn load_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

async fn persist_table<T: Serialize>(path: &Path, table: &[T]) -> Result<()> {
    let content = serde_json::to_string_pretty(table)?;
    fs::write(path, content).await?;
    Ok(())
}

#[async_trait]
impl ScheduleStore for JsonFileRecordStore {
    async fn insert(&self, record: ScheduleRecord) -> Result<()> {
        let mut schedules = self.schedules.lock().await;
        if schedules.iter().any(|r| r.key() == record.key()) {
            return Err(RecordStoreError::Duplicate(record.key()));
        }
        schedules.push(record);
        self.persist_schedules(&schedules).await
    }

    async fn scan(&self) -> Result<Vec<ScheduleRecord>> {
        Ok(self.schedules.lock().await.clone())
    }

    async fn find_by_key(&self, key: &ScheduleKey) -> Result<Option<ScheduleRecord>> {
        Ok(self
            .schedules
            .lock()
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
        let mut schedules = self.schedules.lock().await;
        let record = schedules
            .iter_mut()
            .find(|r| &r.key() == key)
            .ok_or_else(|| RecordStoreError::ScheduleNotFound(key.clone()))?;
        record
            .apply_patch(&patch)
            .map_err(|e| RecordStoreError::InvalidPatch(e.to_string()))?;
        self.persist_schedules(&schedules).await
    }

    async fn delete_by_key(&self, key: &ScheduleKey) -> Result<()> {
        let mut schedules = self.schedules.lock().await;
        let before = schedules.len();
        schedules.retain(|r| &r.key() != key);
        if schedules.len() == before {
            return Err(RecordStoreError::ScheduleNotFound(key.clone()));
        }
        self.persist_schedules(&schedules).await
    }
}

#[async_trait]
impl AttendanceStore for JsonFileRecordStore {
    async fn upsert_by_key(&self, record: AttendanceRecord) -> Result<()> {
        let mut attendance = self.attendance.lock().await;
        if let Some(existing) = attendance.iter_mut().find(|r| r.key() == record.key()) {
            *existing = record;
        } else {
            attendance.push(record);
        }
        self.persist_attendance(&attendance).await
    }

    async fn scan(&self) -> Result<Vec<AttendanceRecord>> {
        Ok(self.attendance.lock().await.clone())
    }

    async fn find_by_key(&self, key: &AttendanceKey) -> Result<Option<AttendanceRecord>> {
        Ok(self
            .attendance
            .lock()
            .await
            .iter()
            .find(|r| &r.key() == key)
            .cloned())
    }

    async fn delete_by_key(&self, key: &AttendanceKey) -> Result<()> {
        let mut attendance = self.attendance.lock().await;
        let before = attendance.len();
        attendance.retain(|r| &r.key() != key);
        if attendance.len() == before {
            return Err(RecordStoreError::AttendanceNotFound(key.clone()));
        }
        self.persist_attendance(&attendance).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_core::status::AttendanceStatus;
    use chrono::NaiveDate;

    fn schedule(title: &str) -> ScheduleRecord {
        ScheduleRecord {
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            title: title.to_string(),
            time: "10:00".to_string(),
            location: "Meeting Room A".to_string(),
            detail: "details".to_string(),
            deadline: Some("2025/06/10".to_string()),
            scale: None,
        }
    }

    #[tokio::test]
    async fn test_records_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();

        let store = JsonFileRecordStore::open(dir.path()).await.unwrap();
        store.insert(schedule("Kickoff")).await.unwrap();
        store
            .upsert_by_key(AttendanceRecord {
                date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
                title: "Kickoff".to_string(),
                participant_id: "user-1".to_string(),
                display_name: "User One".to_string(),
                status: AttendanceStatus::Attending,
                remarks: String::new(),
            })
            .await
            .unwrap();
        drop(store);

        let reopened = JsonFileRecordStore::open(dir.path()).await.unwrap();
        let schedules = ScheduleStore::scan(&reopened).await.unwrap();
        assert_eq!(schedules.len(), 1);
        assert_eq!(schedules[0], schedule("Kickoff"));
        let attendance = AttendanceStore::scan(&reopened).await.unwrap();
        assert_eq!(attendance.len(), 1);
        assert_eq!(attendance[0].display_name, "User One");
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_rejected_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileRecordStore::open(dir.path()).await.unwrap();
            store.insert(schedule("Kickoff")).await.unwrap();
        }
        let reopened = JsonFileRecordStore::open(dir.path()).await.unwrap();
        let err = reopened.insert(schedule("Kickoff")).await.unwrap_err();
        assert!(matches!(err, RecordStoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_delete_persists_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileRecordStore::open(dir.path()).await.unwrap();
            store.insert(schedule("Kickoff")).await.unwrap();
            ScheduleStore::delete_by_key(&store, &schedule("Kickoff").key())
                .await
                .unwrap();
        }
        let reopened = JsonFileRecordStore::open(dir.path()).await.unwrap();
        assert!(ScheduleStore::scan(&reopened).await.unwrap().is_empty());
    }
}
