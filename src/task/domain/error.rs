//! Error types for task field validation.

use std::fmt;
use thiserror::Error;

/// Task field that a validation rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    /// The task title.
    Title,
    /// The optional long-form description.
    Description,
    /// The optional calendar due date.
    DueDate,
    /// The priority level.
    Priority,
    /// The workflow status.
    Status,
}

impl TaskField {
    /// Returns the field name as used in request payloads and storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "due_date",
            Self::Priority => "priority",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned when a task field fails a constraint.
///
/// Every variant is recoverable: the caller may correct the input and retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The title is empty after trimming.
    #[error("title must not be empty")]
    EmptyTitle,

    /// The title exceeds the maximum length.
    #[error("title is {actual} characters long, the limit is {max}")]
    TitleTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected title in characters.
        actual: usize,
    },

    /// The description exceeds the maximum length.
    #[error("description is {actual} characters long, the limit is {max}")]
    DescriptionTooLong {
        /// Maximum permitted length in characters.
        max: usize,
        /// Length of the rejected description in characters.
        actual: usize,
    },

    /// The due date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid due date '{0}', expected YYYY-MM-DD")]
    InvalidDueDate(String),

    /// The priority is not one of the enumerated levels.
    #[error("invalid priority '{0}', expected one of LOW, MEDIUM, HIGH")]
    InvalidPriority(String),

    /// The status is not one of the enumerated workflow states.
    #[error("invalid status '{0}', expected one of PENDING, IN_PROGRESS, COMPLETED")]
    InvalidStatus(String),
}

impl ValidationError {
    /// Returns the field that failed validation.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => TaskField::Title,
            Self::DescriptionTooLong { .. } => TaskField::Description,
            Self::InvalidDueDate(_) => TaskField::DueDate,
            Self::InvalidPriority(_) => TaskField::Priority,
            Self::InvalidStatus(_) => TaskField::Status,
        }
    }
}
