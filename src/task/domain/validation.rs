//! Field validation and normalization rules.
//!
//! Each rule is a pure function that takes raw caller input and either
//! returns the normalized domain value or a [`ValidationError`] naming the
//! failed field. The entity constructors and the task manager both go
//! through these rules, so invalid input never reaches a stored task.

use super::{Priority, TaskDescription, TaskStatus, TaskTitle, ValidationError};
use chrono::NaiveDate;

/// Textual exchange format for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Positions of the separators in a `YYYY-MM-DD` string.
const DATE_SEPARATOR_POSITIONS: [usize; 2] = [4, 7];

/// Length of a `YYYY-MM-DD` string.
const DATE_LENGTH: usize = 10;

/// Validates and normalizes a task title.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTitle`] or
/// [`ValidationError::TitleTooLong`].
pub fn validate_title(value: &str) -> Result<TaskTitle, ValidationError> {
    TaskTitle::new(value)
}

/// Validates an optional description. Absence is always valid.
///
/// # Errors
///
/// Returns [`ValidationError::DescriptionTooLong`] when the description is
/// longer than 500 characters.
pub fn validate_description(
    value: Option<&str>,
) -> Result<Option<TaskDescription>, ValidationError> {
    value.map(TaskDescription::new).transpose()
}

/// Parses a `YYYY-MM-DD` due date. Past dates are accepted.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDueDate`] when the value is not a
/// zero-padded `YYYY-MM-DD` string naming a real calendar day.
pub fn validate_due_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let candidate = value.trim();
    if !has_date_shape(candidate) {
        return Err(ValidationError::InvalidDueDate(value.to_owned()));
    }
    NaiveDate::parse_from_str(candidate, DUE_DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDueDate(value.to_owned()))
}

/// Parses a priority level, ignoring case and surrounding whitespace.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPriority`] for anything other than
/// `LOW`, `MEDIUM` or `HIGH`.
pub fn validate_priority(value: &str) -> Result<Priority, ValidationError> {
    Priority::try_from(value)
}

/// Parses a workflow status, ignoring case and surrounding whitespace.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidStatus`] for anything other than
/// `PENDING`, `IN_PROGRESS` or `COMPLETED`.
pub fn validate_status(value: &str) -> Result<TaskStatus, ValidationError> {
    TaskStatus::try_from(value)
}

fn has_date_shape(value: &str) -> bool {
    value.len() == DATE_LENGTH
        && value.bytes().enumerate().all(|(position, byte)| {
            if DATE_SEPARATOR_POSITIONS.contains(&position) {
                byte == b'-'
            } else {
                byte.is_ascii_digit()
            }
        })
}
