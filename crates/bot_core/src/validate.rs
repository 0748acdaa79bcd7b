//! Input validators for the conversational flows
//!
//! Each validator takes the raw chat text for one field and either returns
//! the normalized stored value or a `ValidationError` whose display text is
//! the re-prompt guidance shown to the user.

use chrono::NaiveDate;
use thiserror::Error;

use crate::schema::FieldKind;

/// Literal a user types to leave an optional field empty.
pub const NONE_SENTINEL: &str = "none";

/// A rejected field input. The display text is user-facing guidance and is
/// sent back verbatim as the re-prompt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The date format is invalid. Please enter it in YYYY/MM/DD format.\nExample: 2025/06/15")]
    InvalidDate,

    #[error("The time format is invalid. Please enter it as HH:MM on a 24-hour clock.\nExample: 10:00")]
    InvalidTime,

    #[error("This field cannot be empty. Please enter a value.")]
    EmptyRequiredField,
}

/// Parse a `YYYY/MM/DD` date, tolerating missing leading zeros.
/// Only real calendar dates are accepted.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.len() != 3 {
        return Err(ValidationError::InvalidDate);
    }
    // Reject shapes like `15/06/2025` early: the year segment must be 4 digits.
    if parts[0].len() != 4 {
        return Err(ValidationError::InvalidDate);
    }
    let year: i32 = parts[0].parse().map_err(|_| ValidationError::InvalidDate)?;
    let month: u32 = parts[1].parse().map_err(|_| ValidationError::InvalidDate)?;
    let day: u32 = parts[2].parse().map_err(|_| ValidationError::InvalidDate)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ValidationError::InvalidDate)
}

/// Canonical rendering of a date, zero-padded `YYYY/MM/DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Parse an `HH:MM` / `H:MM` 24-hour time and normalize it to zero-padded
/// `HH:MM`. A bare hour (`9`) is accepted as `09:00`.
pub fn parse_time(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    let (hour_part, minute_part) = match trimmed.split_once(':') {
        Some((h, m)) => (h, m),
        None => (trimmed, "0"),
    };
    if hour_part.is_empty() || hour_part.len() > 2 || minute_part.len() > 2 {
        return Err(ValidationError::InvalidTime);
    }
    let hour: u32 = hour_part.parse().map_err(|_| ValidationError::InvalidTime)?;
    let minute: u32 = minute_part
        .parse()
        .map_err(|_| ValidationError::InvalidTime)?;
    if hour > 23 || minute > 59 {
        return Err(ValidationError::InvalidTime);
    }
    Ok(format!("{hour:02}:{minute:02}"))
}

/// Validate raw input for a field of the given kind, returning the normalized
/// value to store. Optional kinds map the `none` sentinel to the empty string.
pub fn validate_field(kind: FieldKind, input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    match kind {
        FieldKind::Date => parse_date(trimmed).map(format_date),
        FieldKind::Time => parse_time(trimmed),
        FieldKind::RequiredText => {
            if trimmed.is_empty() {
                Err(ValidationError::EmptyRequiredField)
            } else {
                Ok(trimmed.to_string())
            }
        }
        FieldKind::OptionalText => {
            if trimmed == NONE_SENTINEL {
                Ok(String::new())
            } else {
                Ok(trimmed.to_string())
            }
        }
        FieldKind::OptionalDate => {
            if trimmed == NONE_SENTINEL {
                Ok(String::new())
            } else {
                parse_date(trimmed).map(format_date)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates_normalize_regardless_of_leading_zeros() {
        let padded = parse_date("2025/06/05").unwrap();
        let bare = parse_date("2025/6/5").unwrap();
        assert_eq!(padded, bare);
        assert_eq!(format_date(bare), "2025/06/05");
    }

    #[test]
    fn test_non_matching_date_shapes_are_rejected() {
        for input in ["2025-06-15", "15/06/2025", "", "2025/06", "tomorrow"] {
            assert_eq!(parse_date(input), Err(ValidationError::InvalidDate), "{input:?}");
        }
    }

    #[test]
    fn test_impossible_calendar_dates_are_rejected() {
        assert_eq!(parse_date("2025/13/40"), Err(ValidationError::InvalidDate));
        assert_eq!(parse_date("2025/02/30"), Err(ValidationError::InvalidDate));
        // 2024 is a leap year, 2025 is not.
        assert!(parse_date("2024/02/29").is_ok());
        assert_eq!(parse_date("2025/02/29"), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_time_parsing_and_normalization() {
        assert_eq!(parse_time("10:00").unwrap(), "10:00");
        assert_eq!(parse_time("9:05").unwrap(), "09:05");
        assert_eq!(parse_time("9").unwrap(), "09:00");
        assert_eq!(parse_time("24:00"), Err(ValidationError::InvalidTime));
        assert_eq!(parse_time("10:60"), Err(ValidationError::InvalidTime));
        assert_eq!(parse_time("10時"), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn test_required_text_rejects_empty() {
        assert_eq!(
            validate_field(FieldKind::RequiredText, "  "),
            Err(ValidationError::EmptyRequiredField)
        );
        assert_eq!(
            validate_field(FieldKind::RequiredText, " Kickoff ").unwrap(),
            "Kickoff"
        );
    }

    #[test]
    fn test_optional_fields_accept_none_sentinel() {
        assert_eq!(validate_field(FieldKind::OptionalText, "none").unwrap(), "");
        assert_eq!(validate_field(FieldKind::OptionalDate, "none").unwrap(), "");
        assert_eq!(
            validate_field(FieldKind::OptionalDate, "2025/6/1").unwrap(),
            "2025/06/01"
        );
        assert_eq!(
            validate_field(FieldKind::OptionalDate, "soonish"),
            Err(ValidationError::InvalidDate)
        );
    }
}
