//! Attendance status - the fixed three-value answer enumeration
//!
//! Statuses are rendered as single-glyph symbols. Several Unicode lookalikes
//! and word synonyms are accepted on input and normalized to one canonical
//! value per status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Attendance answer for one participant and one schedule.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Will attend (rendered as `○`).
    Attending,
    /// Might attend (rendered as `△`).
    Tentative,
    /// Will not attend (rendered as `×`).
    NotAttending,
}

impl AttendanceStatus {
    /// Parse raw chat input into a status, accepting known synonyms.
    ///
    /// The circle glyphs `○` (U+25CB), `〇` (U+3007) and `◯` (U+25EF) all map
    /// to `Attending`; `×` (U+00D7) and `✕` (U+2715) map to `NotAttending`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "○" | "〇" | "◯" | "o" | "O" | "yes" => Some(Self::Attending),
            "△" | "?" | "maybe" => Some(Self::Tentative),
            "×" | "✕" | "x" | "X" | "no" => Some(Self::NotAttending),
            _ => None,
        }
    }

    /// The canonical single-glyph rendering of this status.
    pub fn as_symbol(&self) -> &'static str {
        match self {
            Self::Attending => "○",
            Self::Tentative => "△",
            Self::NotAttending => "×",
        }
    }

    /// Whether this status counts as a planned participation
    /// (attending or tentative).
    pub fn is_planned(&self) -> bool {
        matches!(self, Self::Attending | Self::Tentative)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}
