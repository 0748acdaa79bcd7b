//! bot_core - Core types for the schedule bot
//!
//! This crate provides the foundational types used across all bot crates:
//! - `record` - ScheduleRecord, AttendanceRecord and their natural keys
//! - `status` - AttendanceStatus enumeration with symbol normalization
//! - `schema` - the shared schedule field schema (ordered typed descriptors)
//! - `validate` - input validators for dates, times and text fields

pub mod record;
pub mod schema;
pub mod status;
pub mod validate;

// Re-export commonly used types
pub use record::{AttendanceKey, AttendanceRecord, ScheduleKey, ScheduleRecord};
pub use schema::{FieldDescriptor, FieldId, FieldKind, SCHEDULE_FIELDS};
pub use status::AttendanceStatus;
pub use validate::{validate_field, ValidationError, NONE_SENTINEL};
