//! Schedule field schema - single source of truth for schedule columns
//!
//! Every flow and every record-store backend works from this one ordered list
//! of typed field descriptors. Prompts, validation rules, summary rendering
//! and edit-field lookup are all derived from it.

use serde::{Deserialize, Serialize};

/// Identifies one schedule field.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Date,
    Title,
    Time,
    Location,
    Detail,
    Deadline,
    Scale,
}

/// The expected shape of a field's raw text input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// Calendar date, `YYYY/MM/DD`.
    Date,
    /// 24-hour clock time, `HH:MM` or `H:MM`.
    Time,
    /// Non-empty free text.
    RequiredText,
    /// Free text where the literal `none` stores the empty value.
    OptionalText,
    /// Calendar date where the literal `none` stores the empty value.
    OptionalDate,
}

/// One schedule column: identity, input shape and the prompts shown to users.
pub struct FieldDescriptor {
    pub id: FieldId,
    /// Human-readable label used in summaries and edit-field selection.
    pub label: &'static str,
    pub kind: FieldKind,
    /// The question asked when collecting this field.
    pub prompt: &'static str,
}

/// All schedule fields, in the order registration collects them.
pub const SCHEDULE_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        id: FieldId::Date,
        label: "date",
        kind: FieldKind::Date,
        prompt: "Please enter the date in YYYY/MM/DD format.\nExample: 2025/06/15",
    },
    FieldDescriptor {
        id: FieldId::Title,
        label: "title",
        kind: FieldKind::RequiredText,
        prompt: "Next, please enter the schedule title.",
    },
    FieldDescriptor {
        id: FieldId::Time,
        label: "time",
        kind: FieldKind::Time,
        prompt: "Please enter the time. (Example: 10:00)",
    },
    FieldDescriptor {
        id: FieldId::Location,
        label: "location",
        kind: FieldKind::RequiredText,
        prompt: "Please enter the location. (Example: Meeting Room A)",
    },
    FieldDescriptor {
        id: FieldId::Detail,
        label: "detail",
        kind: FieldKind::RequiredText,
        prompt: "Please enter the details.",
    },
    FieldDescriptor {
        id: FieldId::Deadline,
        label: "deadline",
        kind: FieldKind::OptionalDate,
        prompt: "Please enter the application deadline in YYYY/MM/DD format. (Enter \"none\" if there is none.)",
    },
    FieldDescriptor {
        id: FieldId::Scale,
        label: "scale",
        kind: FieldKind::OptionalText,
        prompt: "Please enter the scale or duration. (Enter \"none\" if there is none.)",
    },
];

impl FieldId {
    /// Look up the descriptor for this field.
    pub fn descriptor(&self) -> &'static FieldDescriptor {
        SCHEDULE_FIELDS
            .iter()
            .find(|d| d.id == *self)
            .unwrap_or_else(|| unreachable!("every FieldId has a descriptor"))
    }

    /// Whether this field may be changed by the edit flow. The natural-key
    /// fields (date, title) are not editable; changing them is a delete
    /// followed by a fresh registration.
    pub fn is_editable(&self) -> bool {
        !matches!(self, Self::Date | Self::Title)
    }
}

/// Resolve an edit-field selection typed by the user to a field id.
/// Matching is by label, case-insensitive, editable fields only.
pub fn editable_field_by_label(label: &str) -> Option<FieldId> {
    let needle = label.trim().to_lowercase();
    SCHEDULE_FIELDS
        .iter()
        .filter(|d| d.id.is_editable())
        .find(|d| d.label == needle)
        .map(|d| d.id)
}

/// Comma-separated list of editable field labels, for prompts.
pub fn editable_field_labels() -> String {
    SCHEDULE_FIELDS
        .iter()
        .filter(|d| d.id.is_editable())
        .map(|d| d.label)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_descriptor() {
        for field in [
            FieldId::Date,
            FieldId::Title,
            FieldId::Time,
            FieldId::Location,
            FieldId::Detail,
            FieldId::Deadline,
            FieldId::Scale,
        ] {
            assert_eq!(field.descriptor().id, field);
        }
    }

    #[test]
    fn test_key_fields_are_not_editable() {
        assert!(!FieldId::Date.is_editable());
        assert!(!FieldId::Title.is_editable());
        assert!(FieldId::Location.is_editable());
    }

    #[test]
    fn test_edit_field_lookup_by_label() {
        assert_eq!(editable_field_by_label("location"), Some(FieldId::Location));
        assert_eq!(editable_field_by_label(" Deadline "), Some(FieldId::Deadline));
        // Key fields are not offered for editing.
        assert_eq!(editable_field_by_label("title"), None);
        assert_eq!(editable_field_by_label("venue"), None);
    }

    #[test]
    fn test_editable_labels_listing() {
        assert_eq!(
            editable_field_labels(),
            "time, location, detail, deadline, scale"
        );
    }
}
