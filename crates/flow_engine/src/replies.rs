//! User-facing message catalogue
//!
//! Every string a user can receive is built here, so flows stay free of
//! formatting and the integration tests have one place to assert against.
//! Field prompts come from the schema descriptors and are not duplicated.

use bot_core::record::{AttendanceRecord, ScheduleKey, ScheduleRecord};
use bot_core::schema::{editable_field_labels, FieldId, SCHEDULE_FIELDS};

// ========== Universal ==========

pub const CANCEL_ACK: &str = "Cancelled the current operation.";
pub const END_ACK: &str = "The session has ended.";
pub const ANSWER_YES_NO: &str = "Please answer \"yes\" or \"no\".";
pub const STORE_FAILURE: &str =
    "Sorry, something went wrong while accessing the records. The operation has been cancelled. Please try again.";
pub const SESSION_RESET: &str =
    "The conversation state was inconsistent and has been reset. Please start over.";
pub const SCHEDULE_NOT_FOUND: &str =
    "The specified schedule could not be found. Please check the date and title and start over.";

pub fn help() -> String {
    [
        "I did not understand that. Available commands:",
        "- register schedule",
        "- list schedules",
        "- edit schedule",
        "- delete schedule",
        "- register attendance",
        "- list my attendance",
        "- edit attendance",
        "- list participants",
        "You can type \"cancel\" at any time to stop the current operation.",
    ]
    .join("\n")
}

/// All fields of a schedule, one `label: value` line per schema field.
pub fn render_schedule(record: &ScheduleRecord) -> String {
    SCHEDULE_FIELDS
        .iter()
        .map(|d| format!("{}: {}", d.label, record.field_value(d.id)))
        .collect::<Vec<_>>()
        .join("\n")
}

// ========== Schedule registration ==========

pub const REGISTRATION_STARTED: &str = "Starting schedule registration.";
pub const SCHEDULE_REGISTERED: &str = "The schedule has been registered.";
pub const ASK_REGISTER_ANOTHER: &str =
    "Would you like to register another schedule? (yes/no)";
pub const REGISTRATION_DISCARDED: &str =
    "The registration has been discarded.";
pub const REGISTRATION_FINISHED: &str = "Finished schedule registration.";

pub fn confirm_registration(record: &ScheduleRecord) -> String {
    format!(
        "The following schedule will be registered. Is this okay? (yes/no)\n{}",
        render_schedule(record)
    )
}

pub fn duplicate_schedule(key: &ScheduleKey) -> String {
    format!(
        "A schedule for {} is already registered. Nothing was changed.",
        key.describe()
    )
}

// ========== Schedule edit ==========

pub const EDIT_STARTED: &str =
    "Starting schedule edit. First, identify the schedule to change.";
pub const ASK_EDIT_ANOTHER: &str = "Would you like to edit another schedule? (yes/no)";
pub const EDIT_FINISHED: &str = "Finished schedule edit.";

pub fn current_values(record: &ScheduleRecord) -> String {
    format!("Current values:\n{}", render_schedule(record))
}

pub fn ask_edit_field() -> String {
    format!(
        "Which field would you like to change? ({})",
        editable_field_labels()
    )
}

pub fn unknown_edit_field() -> String {
    format!(
        "That is not an editable field. Please choose one of: {}",
        editable_field_labels()
    )
}

pub fn field_updated(field: FieldId) -> String {
    format!("The {} has been updated.", field.descriptor().label)
}

// ========== Schedule deletion ==========

pub const DELETION_STARTED: &str =
    "Starting schedule deletion. First, identify the schedule to delete.";
pub const SCHEDULE_DELETED: &str = "The schedule has been deleted.";
pub const ASK_DELETE_ANOTHER: &str =
    "Would you like to delete another schedule? (yes/no)";
pub const DELETION_DISCARDED: &str = "The deletion has been discarded.";
pub const DELETION_FINISHED: &str = "Finished schedule deletion.";

pub fn confirm_deletion(record: &ScheduleRecord) -> String {
    format!(
        "The following schedule will be deleted. Is this okay? (yes/no)\n{}",
        render_schedule(record)
    )
}

// ========== Attendance registration ==========

pub const NO_PENDING_ATTENDANCE: &str =
    "There are no schedules awaiting your attendance answer.";
pub const STATUS_REPROMPT: &str =
    "Please answer with ○ (attending), △ (tentative) or × (not attending).";
pub const ASK_REMARKS: &str =
    "Please enter any remarks. (Enter \"none\" if there are none.)";
pub const ATTENDANCE_RECORDED: &str = "Your answer has been recorded.";
pub const ATTENDANCE_COMPLETE: &str =
    "All attendance answers have been registered. Thank you!";

pub fn attendance_started(pending: usize) -> String {
    format!(
        "Starting attendance registration. {pending} schedule(s) are awaiting your answer."
    )
}

pub fn ask_status(key: &ScheduleKey) -> String {
    format!(
        "{}\nWill you attend? (○ / △ / ×)",
        key.describe()
    )
}

// ========== Attendance edit ==========

pub const ATTENDANCE_EDIT_STARTED: &str =
    "Starting attendance edit. First, identify the schedule.";
pub const ATTENDANCE_NOT_FOUND: &str =
    "No attendance answer of yours was found for that schedule.";
pub const ASK_CANCEL_ATTENDANCE: &str =
    "Would you like to cancel this attendance answer? (yes/no)";
pub const ATTENDANCE_CANCELLED: &str = "The attendance answer has been cancelled.";
pub const ASK_EDIT_REMARKS: &str = "Would you like to edit the remarks? (yes/no)";
pub const ASK_NEW_REMARKS: &str =
    "Please enter the new remarks. (Enter \"none\" to clear them.)";
pub const REMARKS_UPDATED: &str = "The remarks have been updated.";
pub const ASK_EDIT_ANOTHER_ATTENDANCE: &str =
    "Would you like to edit another attendance answer? (yes/no)";
pub const ATTENDANCE_EDIT_FINISHED: &str = "Finished attendance edit.";

pub fn current_attendance(record: &AttendanceRecord) -> String {
    let remarks = if record.remarks.is_empty() {
        String::new()
    } else {
        format!(" ({})", record.remarks)
    };
    format!(
        "Your current answer for {}: {}{}",
        record.key().schedule_key().describe(),
        record.status.as_symbol(),
        remarks
    )
}

// ========== List queries ==========

pub const NO_SCHEDULES: &str = "No schedules are registered.";
pub const NO_PLANNED_ATTENDANCE: &str = "You have no planned attendance.";
pub const NO_ATTENDANCE_ROWS: &str = "No attendance has been registered yet.";

pub fn schedule_listing(blocks: &[String]) -> String {
    format!("Registered schedules:\n\n{}", blocks.join("\n\n"))
}

pub fn my_attendance_listing(lines: &[String]) -> String {
    format!("Your planned attendance:\n{}", lines.join("\n"))
}

pub fn participant_listing(blocks: &[String]) -> String {
    format!("Participants by schedule:\n\n{}", blocks.join("\n\n"))
}

pub fn attendance_line(record: &AttendanceRecord) -> String {
    let remarks = if record.remarks.is_empty() {
        String::new()
    } else {
        format!(" ({})", record.remarks)
    };
    format!(
        "{} {}{}",
        record.key().schedule_key().describe(),
        record.status.as_symbol(),
        remarks
    )
}

pub fn participant_block(key: &ScheduleKey, rows: &[AttendanceRecord]) -> String {
    let mut lines = vec![format!("{} - {} answered", key.describe(), rows.len())];
    for row in rows {
        let remarks = if row.remarks.is_empty() {
            String::new()
        } else {
            format!(" ({})", row.remarks)
        };
        lines.push(format!("  {} {}{}", row.status.as_symbol(), row.display_name, remarks));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> ScheduleRecord {
        ScheduleRecord {
            date: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            title: "Kickoff".to_string(),
            time: "10:00".to_string(),
            location: "Meeting Room A".to_string(),
            detail: "Project kickoff".to_string(),
            deadline: None,
            scale: Some("2h".to_string()),
        }
    }

    #[test]
    fn test_schedule_rendering_covers_every_field() {
        let rendered = render_schedule(&record());
        assert_eq!(rendered.lines().count(), SCHEDULE_FIELDS.len());
        assert!(rendered.contains("date: 2025/06/15"));
        assert!(rendered.contains("deadline: none"));
        assert!(rendered.contains("scale: 2h"));
    }

    #[test]
    fn test_help_lists_every_command() {
        let help = help();
        for command in [
            "register schedule",
            "list schedules",
            "edit schedule",
            "delete schedule",
            "register attendance",
            "list my attendance",
            "edit attendance",
            "list participants",
        ] {
            assert!(help.contains(command), "help should mention {command:?}");
        }
    }
}
