//! Shared fixtures for task unit tests.

use crate::task::domain::{
    PersistedTaskData, Priority, Task, TaskId, TaskStatus, TaskTitle,
};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Clock pinned to a settable instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += by;
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().expect("clock lock") = instant;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub fn instant(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid instant")
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn task_id(value: &str) -> TaskId {
    TaskId::from_uuid(Uuid::parse_str(value).expect("valid uuid"))
}

/// Persisted data for a pending, medium-priority task created at `created_at`.
pub fn persisted(id: TaskId, title: &str, created_at: DateTime<Utc>) -> PersistedTaskData {
    PersistedTaskData {
        id,
        title: TaskTitle::new(title).expect("valid title"),
        description: None,
        due_date: None,
        priority: Priority::Medium,
        status: TaskStatus::Pending,
        created_at,
        updated_at: created_at,
    }
}

/// Builds a task through a closure that adjusts its persisted data.
pub fn task_with(
    title: &str,
    created_at: DateTime<Utc>,
    adjust: impl FnOnce(&mut PersistedTaskData),
) -> Task {
    let mut data = persisted(TaskId::new(), title, created_at);
    adjust(&mut data);
    Task::from_persisted(data)
}

pub fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title().as_str()).collect()
}
