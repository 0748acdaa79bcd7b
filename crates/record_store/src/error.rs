//! Record store error type

use bot_core::record::{AttendanceKey, ScheduleKey};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordStoreError {
    /// A schedule with the same natural key already exists.
    /// Duplicate (date, title) pairs are rejected uniformly on insert.
    #[error("schedule {} already exists", .0.describe())]
    Duplicate(ScheduleKey),

    /// No schedule matches the natural key.
    #[error("schedule {} not found", .0.describe())]
    ScheduleNotFound(ScheduleKey),

    /// No attendance row matches the natural key.
    #[error("attendance for {} by {} not found", .0.schedule_key().describe(), .0.participant_id)]
    AttendanceNotFound(AttendanceKey),

    /// Backend I/O failure; candidates for retry.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A patch carried a value the record cannot hold.
    #[error("invalid patch value: {0}")]
    InvalidPatch(String),

    /// The backend rejected the operation for a non-key reason
    /// (e.g. the remote table service is unavailable).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl RecordStoreError {
    /// Whether retrying the same operation can succeed. Key conflicts and
    /// missing keys are deterministic and must not be retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_key_errors_are_not_transient() {
        let key = ScheduleKey::new(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(), "Kickoff");
        assert!(!RecordStoreError::Duplicate(key.clone()).is_transient());
        assert!(!RecordStoreError::ScheduleNotFound(key).is_transient());
        assert!(RecordStoreError::Unavailable("down".into()).is_transient());
    }
}
