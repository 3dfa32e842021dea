//! Filtering, sorting and statistics over in-memory task collections.
//!
//! Everything here is pure: callers hand over the tasks and, for
//! statistics, the reference date.

use crate::task::domain::{Priority, Task, TaskStatus};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of the "due soon" window in days, counted from today inclusive.
pub const DUE_SOON_WINDOW_DAYS: u64 = 7;

/// Due-date predicate relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateFilter {
    /// Due strictly before the date.
    Before(NaiveDate),
    /// Due strictly after the date.
    After(NaiveDate),
    /// Due on the date itself.
    On(NaiveDate),
}

impl DueDateFilter {
    /// Returns whether a due date satisfies the predicate.
    #[must_use]
    pub fn matches(self, due_date: NaiveDate) -> bool {
        match self {
            Self::Before(reference) => due_date < reference,
            Self::After(reference) => due_date > reference,
            Self::On(reference) => due_date == reference,
        }
    }
}

/// Conjunction of optional task predicates.
///
/// Absent criteria impose no constraint. A due-date criterion never matches
/// a task without a due date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    status: Option<TaskStatus>,
    priority: Option<Priority>,
    due_date: Option<DueDateFilter>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the given status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requires the given priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Requires the due date to satisfy the predicate.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDateFilter) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns whether the task satisfies every supplied criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self.status.is_none_or(|status| task.status() == status);
        let priority_ok = self
            .priority
            .is_none_or(|priority| task.priority() == priority);
        let due_ok = self.due_date.is_none_or(|predicate| {
            task.due_date()
                .is_some_and(|due_date| predicate.matches(due_date))
        });
        status_ok && priority_ok && due_ok
    }

    /// Keeps the tasks that satisfy the filter, preserving their order.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        tasks.into_iter().filter(|task| self.matches(task)).collect()
    }
}

/// Field a task list can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Due date; tasks without one always come last.
    DueDate,
    /// Priority ordinal (`Low < Medium < High`).
    Priority,
    /// Creation timestamp.
    CreatedAt,
    /// Workflow ordinal (`Pending < InProgress < Completed`).
    Status,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    const fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// Field to sort by.
    pub key: SortKey,
    /// Direction to sort in.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Creates a sort order.
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Returns the preset name for this order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match (self.key, self.direction) {
            (SortKey::DueDate, SortDirection::Ascending) => "due_date_asc",
            (SortKey::DueDate, SortDirection::Descending) => "due_date_desc",
            (SortKey::Priority, SortDirection::Descending) => "priority_high",
            (SortKey::Priority, SortDirection::Ascending) => "priority_low",
            (SortKey::CreatedAt, SortDirection::Ascending) => "created_asc",
            (SortKey::CreatedAt, SortDirection::Descending) => "created_desc",
            (SortKey::Status, SortDirection::Ascending) => "status",
            (SortKey::Status, SortDirection::Descending) => "status_desc",
        }
    }

    /// Sorts tasks in place according to this order.
    pub fn apply(self, tasks: &mut [Task]) {
        sort_tasks(tasks, self.key, self.direction);
    }
}

/// Error returned for an unknown sort preset name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "unknown sort order '{0}', expected one of due_date_asc, due_date_desc, priority_high, \
     priority_low, created_asc, created_desc, status, status_desc"
)]
pub struct ParseSortOrderError(pub String);

impl FromStr for SortOrder {
    type Err = ParseSortOrderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let (key, direction) = match normalized.as_str() {
            "due_date_asc" => (SortKey::DueDate, SortDirection::Ascending),
            "due_date_desc" => (SortKey::DueDate, SortDirection::Descending),
            "priority_high" => (SortKey::Priority, SortDirection::Descending),
            "priority_low" => (SortKey::Priority, SortDirection::Ascending),
            "created_asc" => (SortKey::CreatedAt, SortDirection::Ascending),
            "created_desc" => (SortKey::CreatedAt, SortDirection::Descending),
            "status" => (SortKey::Status, SortDirection::Ascending),
            "status_desc" => (SortKey::Status, SortDirection::Descending),
            _ => return Err(ParseSortOrderError(value.to_owned())),
        };
        Ok(Self::new(key, direction))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable sort of `tasks` by `key` in `direction`.
///
/// Tasks without a due date sort after all dated tasks in both directions
/// when sorting by due date. Ties are broken by creation time, oldest first.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey, direction: SortDirection) {
    tasks.sort_by(|left, right| {
        primary_ordering(left, right, key, direction)
            .then_with(|| left.created_at().cmp(&right.created_at()))
    });
}

fn primary_ordering(left: &Task, right: &Task, key: SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::DueDate => match (left.due_date(), right.due_date()) {
            (Some(left_due), Some(right_due)) => direction.orient(left_due.cmp(&right_due)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Priority => direction.orient(left.priority().cmp(&right.priority())),
        SortKey::CreatedAt => direction.orient(left.created_at().cmp(&right.created_at())),
        SortKey::Status => direction.orient(left.status().cmp(&right.status())),
    }
}

/// Task counts per workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Pending tasks.
    pub pending: usize,
    /// In-progress tasks.
    pub in_progress: usize,
    /// Completed tasks.
    pub completed: usize,
}

impl StatusCounts {
    /// Returns the count for one status.
    #[must_use]
    pub const fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Completed => self.completed,
        }
    }

    const fn record(&mut self, status: TaskStatus) {
        match status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Completed => self.completed += 1,
        }
    }
}

/// Task counts per priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    /// Low-priority tasks.
    pub low: usize,
    /// Medium-priority tasks.
    pub medium: usize,
    /// High-priority tasks.
    pub high: usize,
}

impl PriorityCounts {
    /// Returns the count for one priority.
    #[must_use]
    pub const fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }

    const fn record(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
        }
    }
}

/// Summary counts over a task set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskStatistics {
    /// Number of tasks.
    pub total: usize,
    /// Counts per status.
    pub by_status: StatusCounts,
    /// Counts per priority.
    pub by_priority: PriorityCounts,
    /// Unfinished tasks whose due date is before today.
    pub overdue: usize,
    /// Unfinished tasks due between today and today plus seven days,
    /// inclusive.
    pub due_soon: usize,
}

/// Computes statistics for `tasks` relative to the calendar date `today`.
#[must_use]
pub fn compute_statistics(tasks: &[Task], today: NaiveDate) -> TaskStatistics {
    let window_end = today
        .checked_add_days(Days::new(DUE_SOON_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);

    tasks
        .iter()
        .fold(TaskStatistics::default(), |mut stats, task| {
            stats.total += 1;
            stats.by_status.record(task.status());
            stats.by_priority.record(task.priority());

            if let Some(due_date) = task.due_date().filter(|_| !task.status().is_completed()) {
                if due_date < today {
                    stats.overdue += 1;
                } else if due_date <= window_end {
                    stats.due_soon += 1;
                }
            }
            stats
        })
}
