//! Session - the per-conversation state snapshot
//!
//! A session tracks which flow/step is active, the validated field values
//! collected so far, and (for the attendance registration flow) the list of
//! pending schedules with a cursor into it.

use std::collections::BTreeMap;

use bot_core::record::ScheduleKey;
use bot_core::schema::FieldId;
use serde::{Deserialize, Serialize};

use crate::step::FlowStep;

/// State of one conversation. Mutated at most once per inbound message.
///
/// Invariant: an `Idle` session carries no fields and no pending items;
/// construct idle sessions through `Session::idle()` to preserve it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct Session {
    /// Current step. `FlowStep::Idle` when no flow is active.
    pub current_step: FlowStep,
    /// Validated values collected so far, keyed by schema field.
    pub fields: BTreeMap<FieldId, String>,
    /// Schedules still awaiting an answer (attendance registration only).
    pub pending: Vec<ScheduleKey>,
    /// Index of the pending item currently being asked about.
    pub cursor: usize,
}

impl Session {
    /// The idle session: no flow, no collected data.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Start a flow at the given step with fresh fields.
    pub fn start(step: FlowStep) -> Self {
        Self {
            current_step: step,
            ..Self::default()
        }
    }

    pub fn is_idle(&self) -> bool {
        self.current_step.is_idle()
    }

    /// Store one collected field value.
    pub fn put_field(&mut self, id: FieldId, value: String) {
        self.fields.insert(id, value);
    }

    /// The collected value for a field, empty string when absent.
    pub fn field(&self, id: FieldId) -> &str {
        self.fields.get(&id).map_or("", String::as_str)
    }

    /// The pending schedule the cursor points at, if any.
    pub fn current_pending(&self) -> Option<&ScheduleKey> {
        self.pending.get(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{AttendanceRegistrationStep, ScheduleRegistrationStep};
    use chrono::NaiveDate;

    #[test]
    fn test_idle_session_has_no_data() {
        let session = Session::idle();
        assert!(session.is_idle());
        assert!(session.fields.is_empty());
        assert!(session.pending.is_empty());
        assert_eq!(session.cursor, 0);
    }

    #[test]
    fn test_start_resets_collected_data() {
        let session = Session::start(FlowStep::ScheduleRegistration(
            ScheduleRegistrationStep::first(),
        ));
        assert!(!session.is_idle());
        assert!(session.fields.is_empty());
    }

    #[test]
    fn test_cursor_walks_pending_list() {
        let mut session = Session::start(FlowStep::AttendanceRegistration(
            AttendanceRegistrationStep::AskStatus,
        ));
        session.pending = vec![
            ScheduleKey::new(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(), "Kickoff"),
            ScheduleKey::new(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(), "Review"),
        ];
        assert_eq!(session.current_pending().unwrap().title, "Kickoff");
        session.cursor += 1;
        assert_eq!(session.current_pending().unwrap().title, "Review");
        session.cursor += 1;
        assert!(session.current_pending().is_none());
    }
}
