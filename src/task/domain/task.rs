//! Task entity and the value objects used to create and change it.

use super::{Priority, TaskDescription, TaskId, TaskStatus, TaskTitle};
use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use mockable::Clock;
use serde::Serialize;

/// Fractional-second digits kept on timestamps (`TIMESTAMPTZ` precision).
const TIMESTAMP_PRECISION: u16 = 6;

/// A single trackable work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<TaskDescription>,
    due_date: Option<NaiveDate>,
    priority: Priority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Validated field values for a task that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<TaskDescription>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Priority level.
    pub priority: Priority,
    /// Initial status.
    pub status: TaskStatus,
}

impl NewTask {
    /// Creates creation data with the required fields and a pending status.
    #[must_use]
    pub const fn new(title: TaskTitle, priority: Priority) -> Self {
        Self {
            title,
            description: None,
            due_date: None,
            priority,
            status: TaskStatus::Pending,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: TaskDescription) -> Self {
        self.description = Some(description);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Overrides the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<TaskDescription>,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A set of validated field changes.
///
/// Fields left as `None` are untouched. The optional fields use a nested
/// `Option` so that "clear the value" (`Some(None)`) is distinct from
/// "leave as is" (`None`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<Option<TaskDescription>>,
    due_date: Option<Option<NaiveDate>>,
    priority: Option<Priority>,
    status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<TaskDescription>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }
}

impl Task {
    /// Creates a new task with a fresh identifier.
    ///
    /// Both timestamps are set to the same clock reading.
    #[must_use]
    pub fn new(data: NewTask, clock: &impl Clock) -> Self {
        let timestamp = now(clock);
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            priority: data.priority,
            status: data.status,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    ///
    /// An `updated_at` earlier than `created_at` is raised to `created_at`.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at.max(data.created_at),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub const fn description(&self) -> Option<&TaskDescription> {
        self.description.as_ref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a patch and refreshes `updated_at`.
    ///
    /// An empty patch leaves the task, including its timestamps, untouched.
    /// Returns whether anything was applied.
    pub fn apply(&mut self, patch: TaskPatch, clock: &impl Clock) -> bool {
        if patch.is_empty() {
            return false;
        }

        let TaskPatch {
            title,
            description,
            due_date,
            priority,
            status,
        } = patch;

        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }

        self.touch(clock);
        true
    }

    /// Marks the task as completed.
    ///
    /// Completing an already completed task is a normal mutation and
    /// refreshes `updated_at`.
    pub fn complete(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Completed;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp, never moving it before
    /// `created_at`.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = now(clock).max(self.created_at);
    }
}

fn now(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(TIMESTAMP_PRECISION)
}
