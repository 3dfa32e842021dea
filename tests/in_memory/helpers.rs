//! Shared test helpers for in-memory integration tests.

use chrono::{Days, NaiveDate, SubsecRound, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskmate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{PersistedTaskData, Priority, Task, TaskId, TaskStatus, TaskTitle},
    services::TaskManager,
};

/// Task manager over the in-memory adapter and the system clock.
pub type TestManager = TaskManager<InMemoryTaskRepository, DefaultClock>;

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemoryTaskRepository {
    InMemoryTaskRepository::new()
}

/// Provides a task manager backed by an empty in-memory repository.
#[fixture]
pub fn manager() -> TestManager {
    TaskManager::new(Arc::new(InMemoryTaskRepository::new()), Arc::new(DefaultClock))
}

/// Today's UTC calendar date.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Formats the date `offset` days from today as `YYYY-MM-DD`.
///
/// Negative offsets count backwards.
#[must_use]
pub fn due_in(offset: i64) -> String {
    let magnitude = Days::new(offset.unsigned_abs());
    let shifted = if offset < 0 {
        today().checked_sub_days(magnitude)
    } else {
        today().checked_add_days(magnitude)
    };
    shifted.unwrap_or_else(today).format("%Y-%m-%d").to_string()
}

/// Builds a pending, medium-priority task with the given title.
///
/// # Errors
///
/// Returns an error if the title is invalid.
pub fn sample_task(title: &str) -> Result<Task, eyre::Report> {
    let created_at = Utc::now().trunc_subsecs(6);
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: TaskTitle::new(title)?,
        description: None,
        due_date: None,
        priority: Priority::Medium,
        status: TaskStatus::Pending,
        created_at,
        updated_at: created_at,
    }))
}

/// Collects task titles in order.
#[must_use]
pub fn titles(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect()
}
