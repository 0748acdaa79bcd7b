//! Schedule and attendance records with their natural keys
//!
//! Records carry no surrogate ids: schedules are identified by (date, title)
//! and attendance rows by (date, title, participant id).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::schema::FieldId;
use crate::status::AttendanceStatus;
use crate::validate::{self, ValidationError};

/// Natural key of a schedule: the (date, title) pair.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleKey {
    pub date: NaiveDate,
    pub title: String,
}

impl ScheduleKey {
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
        }
    }

    /// `2025/06/15 "Kickoff"` - the rendering used in prompts.
    pub fn describe(&self) -> String {
        format!("{} \"{}\"", validate::format_date(self.date), self.title)
    }
}

/// One schedule row.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub date: NaiveDate,
    pub title: String,
    pub time: String,
    pub location: String,
    pub detail: String,
    /// Application deadline, canonical `YYYY/MM/DD`; `None` when not set.
    pub deadline: Option<String>,
    /// Scale or duration free text; `None` when not set.
    pub scale: Option<String>,
}

impl ScheduleRecord {
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey::new(self.date, self.title.clone())
    }

    /// Build a record from the validated field values a registration flow
    /// collected. Every required field must be present and the date must be
    /// in canonical form; both hold for maps produced by `validate_field`.
    pub fn from_fields(fields: &BTreeMap<FieldId, String>) -> Result<Self, ValidationError> {
        let date = validate::parse_date(fields.get(&FieldId::Date).map_or("", String::as_str))?;
        let required = |id: FieldId| -> Result<String, ValidationError> {
            match fields.get(&id) {
                Some(value) if !value.is_empty() => Ok(value.clone()),
                _ => Err(ValidationError::EmptyRequiredField),
            }
        };
        let optional = |id: FieldId| -> Option<String> {
            fields.get(&id).filter(|v| !v.is_empty()).cloned()
        };
        Ok(Self {
            date,
            title: required(FieldId::Title)?,
            time: required(FieldId::Time)?,
            location: required(FieldId::Location)?,
            detail: required(FieldId::Detail)?,
            deadline: optional(FieldId::Deadline),
            scale: optional(FieldId::Scale),
        })
    }

    /// Current value of one field, rendered as text (`none` for empty
    /// optional fields).
    pub fn field_value(&self, id: FieldId) -> String {
        match id {
            FieldId::Date => validate::format_date(self.date),
            FieldId::Title => self.title.clone(),
            FieldId::Time => self.time.clone(),
            FieldId::Location => self.location.clone(),
            FieldId::Detail => self.detail.clone(),
            FieldId::Deadline => self.deadline.clone().unwrap_or_else(|| "none".to_string()),
            FieldId::Scale => self.scale.clone().unwrap_or_else(|| "none".to_string()),
        }
    }

    /// Apply a patch of normalized field values. Values come pre-validated
    /// from `validate_field`; empty optional values clear the field.
    pub fn apply_patch(&mut self, patch: &BTreeMap<FieldId, String>) -> Result<(), ValidationError> {
        for (id, value) in patch {
            match id {
                FieldId::Date => self.date = validate::parse_date(value)?,
                FieldId::Title => self.title = value.clone(),
                FieldId::Time => self.time = value.clone(),
                FieldId::Location => self.location = value.clone(),
                FieldId::Detail => self.detail = value.clone(),
                FieldId::Deadline => {
                    self.deadline = if value.is_empty() { None } else { Some(value.clone()) }
                }
                FieldId::Scale => {
                    self.scale = if value.is_empty() { None } else { Some(value.clone()) }
                }
            }
        }
        Ok(())
    }
}

/// Natural key of an attendance row: schedule key plus participant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttendanceKey {
    pub date: NaiveDate,
    pub title: String,
    pub participant_id: String,
}

impl AttendanceKey {
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        participant_id: impl Into<String>,
    ) -> Self {
        Self {
            date,
            title: title.into(),
            participant_id: participant_id.into(),
        }
    }

    pub fn schedule_key(&self) -> ScheduleKey {
        ScheduleKey::new(self.date, self.title.clone())
    }
}

/// One attendance row. References a schedule by (date, title); a dangling
/// reference to a deleted schedule is tolerated.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub date: NaiveDate,
    pub title: String,
    pub participant_id: String,
    pub display_name: String,
    pub status: AttendanceStatus,
    pub remarks: String,
}

impl AttendanceRecord {
    pub fn key(&self) -> AttendanceKey {
        AttendanceKey::new(self.date, self.title.clone(), self.participant_id.clone())
    }
}
