//! The five conversational flows
//!
//! Each flow module exposes `start` (enter the flow from a command) and
//! `handle` (advance the flow by one inbound message). Flows own all session
//! mutations: exactly one store round-trip of session state per message.

pub mod attendance_edit;
pub mod attendance_registration;
pub mod schedule_deletion;
pub mod schedule_edit;
pub mod schedule_registration;

use std::sync::Arc;

use bot_core::record::{AttendanceKey, ScheduleKey};
use bot_core::schema::FieldId;
use bot_core::validate::{self, NONE_SENTINEL};
use bot_state::session::Session;
use bot_state::store::SessionStore;
use record_store::{AttendanceStore, RetryPolicy, ScheduleStore};

/// Shared handles every flow works against.
pub struct FlowServices {
    pub sessions: Arc<dyn SessionStore>,
    pub schedules: Arc<dyn ScheduleStore>,
    pub attendance: Arc<dyn AttendanceStore>,
    pub retry: RetryPolicy,
}

/// A `yes` / `no` answer, `None` when the input is neither.
pub(crate) fn parse_yes_no(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Some(true),
        "no" | "n" => Some(false),
        _ => None,
    }
}

/// Remarks input, with the `none` sentinel storing the empty value.
pub(crate) fn normalize_remarks(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed == NONE_SENTINEL {
        String::new()
    } else {
        trimmed.to_string()
    }
}

/// The schedule key collected so far in this session, if both key fields
/// hold valid values.
pub(crate) fn schedule_key_from(session: &Session) -> Option<ScheduleKey> {
    let date = validate::parse_date(session.field(FieldId::Date)).ok()?;
    let title = session.field(FieldId::Title);
    if title.is_empty() {
        return None;
    }
    Some(ScheduleKey::new(date, title))
}

/// The attendance key for the current participant, if the session holds a
/// valid schedule key.
pub(crate) fn attendance_key_from(session: &Session, participant_id: &str) -> Option<AttendanceKey> {
    let key = schedule_key_from(session)?;
    Some(AttendanceKey::new(key.date, key.title, participant_id))
}
