//! Flow steps - one enum per flow, joined in the `FlowStep` tagged union
//!
//! Each flow is a strictly linear state machine. The per-flow enums make the
//! transition tables explicit (`next()`) and tie field-collecting steps to
//! the schema (`field()`), replacing the string-tag states and prefix
//! dispatch of ad hoc bot implementations.

use bot_core::schema::FieldId;
use bot_core::status::AttendanceStatus;
use serde::{Deserialize, Serialize};

/// Which flow a session belongs to. Used for routing and logging.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    ScheduleRegistration,
    ScheduleEdit,
    ScheduleDeletion,
    AttendanceRegistration,
    AttendanceEdit,
}

// ========== Schedule registration ==========

/// Steps of the schedule registration flow:
/// one step per schema field, then confirm, then the repeat prompt.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleRegistrationStep {
    AskDate,
    AskTitle,
    AskTime,
    AskLocation,
    AskDetail,
    AskDeadline,
    AskScale,
    Confirm,
    Continue,
}

impl ScheduleRegistrationStep {
    /// The first field-collecting step.
    pub fn first() -> Self {
        Self::AskDate
    }

    /// The schema field collected at this step, if it is a field step.
    pub fn field(&self) -> Option<FieldId> {
        match self {
            Self::AskDate => Some(FieldId::Date),
            Self::AskTitle => Some(FieldId::Title),
            Self::AskTime => Some(FieldId::Time),
            Self::AskLocation => Some(FieldId::Location),
            Self::AskDetail => Some(FieldId::Detail),
            Self::AskDeadline => Some(FieldId::Deadline),
            Self::AskScale => Some(FieldId::Scale),
            Self::Confirm | Self::Continue => None,
        }
    }

    /// Transition table: the step that follows a successful input.
    pub fn next(&self) -> Self {
        match self {
            Self::AskDate => Self::AskTitle,
            Self::AskTitle => Self::AskTime,
            Self::AskTime => Self::AskLocation,
            Self::AskLocation => Self::AskDetail,
            Self::AskDetail => Self::AskDeadline,
            Self::AskDeadline => Self::AskScale,
            Self::AskScale => Self::Confirm,
            Self::Confirm => Self::Continue,
            Self::Continue => Self::Continue,
        }
    }
}

// ========== Schedule edit ==========

/// Steps of the schedule edit flow: natural key, lookup happens after the
/// title, then field selection and the new value. The selected field travels
/// in the step itself.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleEditStep {
    AskDate,
    AskTitle,
    AskField,
    AskValue(FieldId),
    Continue,
}

// ========== Schedule deletion ==========

/// Steps of the schedule deletion flow.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleDeletionStep {
    AskDate,
    AskTitle,
    Confirm,
    Continue,
}

// ========== Attendance registration ==========

/// Steps of the attendance registration flow. The flow walks the session's
/// pending schedule list; these two steps repeat per pending item, the status
/// answered at the first step traveling in the second.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceRegistrationStep {
    AskStatus,
    AskRemarks(AttendanceStatus),
}

// ========== Attendance edit ==========

/// Steps of the attendance edit flow.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceEditStep {
    AskDate,
    AskTitle,
    ConfirmCancel,
    AskEditRemarks,
    AskNewRemarks,
    Continue,
}

// ========== Tagged union ==========

/// The current step of a session across all flows. `Idle` means no flow is
/// active; every other variant names its flow, so routing is an exhaustive
/// match instead of a string-prefix check.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FlowStep {
    #[default]
    Idle,
    ScheduleRegistration(ScheduleRegistrationStep),
    ScheduleEdit(ScheduleEditStep),
    ScheduleDeletion(ScheduleDeletionStep),
    AttendanceRegistration(AttendanceRegistrationStep),
    AttendanceEdit(AttendanceEditStep),
}

impl FlowStep {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The flow owning this step, if any.
    pub fn flow_kind(&self) -> Option<FlowKind> {
        match self {
            Self::Idle => None,
            Self::ScheduleRegistration(_) => Some(FlowKind::ScheduleRegistration),
            Self::ScheduleEdit(_) => Some(FlowKind::ScheduleEdit),
            Self::ScheduleDeletion(_) => Some(FlowKind::ScheduleDeletion),
            Self::AttendanceRegistration(_) => Some(FlowKind::AttendanceRegistration),
            Self::AttendanceEdit(_) => Some(FlowKind::AttendanceEdit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_is_idle() {
        assert_eq!(FlowStep::default(), FlowStep::Idle);
        assert!(FlowStep::Idle.is_idle());
    }

    #[test]
    fn test_registration_transition_table_reaches_confirm() {
        let mut step = ScheduleRegistrationStep::first();
        let mut fields = Vec::new();
        while let Some(field) = step.field() {
            fields.push(field);
            step = step.next();
        }
        assert_eq!(step, ScheduleRegistrationStep::Confirm);
        assert_eq!(fields.len(), 7);
        assert_eq!(fields[0], FieldId::Date);
        assert_eq!(fields[1], FieldId::Title);
    }

    #[test]
    fn test_steps_know_their_flow() {
        let step = FlowStep::ScheduleEdit(ScheduleEditStep::AskField);
        assert_eq!(step.flow_kind(), Some(FlowKind::ScheduleEdit));
        assert_eq!(FlowStep::Idle.flow_kind(), None);
    }
}
