//! Validated scalar field types for the task entity.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum title length in characters, matching the `VARCHAR(100)` column.
pub const MAX_TITLE_LENGTH: usize = 100;

/// Maximum description length in characters, matching the `VARCHAR(500)`
/// column.
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Non-empty task title of at most [`MAX_TITLE_LENGTH`] characters.
///
/// Surrounding whitespace is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTitle`] when the value is empty after
    /// trimming, or [`ValidationError::TitleTooLong`] when the value as given
    /// (padding included) is longer than [`MAX_TITLE_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let length = raw.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(ValidationError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Task description of at most [`MAX_DESCRIPTION_LENGTH`] characters.
///
/// Stored verbatim; an empty description is valid and distinct from an
/// absent one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDescription(String);

impl TaskDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DescriptionTooLong`] when the value is
    /// longer than [`MAX_DESCRIPTION_LENGTH`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let length = raw.chars().count();
        if length > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::DescriptionTooLong {
                max: MAX_DESCRIPTION_LENGTH,
                actual: length,
            });
        }
        Ok(Self(raw))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TaskDescription {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TaskDescription> for String {
    fn from(value: TaskDescription) -> Self {
        value.0
    }
}

impl AsRef<str> for TaskDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
