//! record_store - Tabular persistence for schedule and attendance records
//!
//! The flows talk to the two logical tables only through the `ScheduleStore`
//! and `AttendanceStore` traits; the backend decides how append, scan,
//! update-by-key and delete-by-key are carried out. Backends:
//! - `memory` - in-process tables, used in tests and ephemeral deployments
//! - `json_file` - one JSON file per table, read-modify-write
//!
//! Transient failures are retried by the `retry` helpers before surfacing.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod retry;
mod traits;

pub use error::RecordStoreError;
pub use json_file::JsonFileRecordStore;
pub use memory::InMemoryRecordStore;
pub use retry::{with_retry, RetryPolicy};
pub use traits::{AttendanceStore, ScheduleStore};

/// Convenience alias used throughout the store backends.
pub type Result<T, E = RecordStoreError> = std::result::Result<T, E>;
