//! Shared test helpers for `PostgreSQL` integration tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool, TestCustomizer};
use std::env;
use std::sync::OnceLock;
use taskmate::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{PersistedTaskData, Priority, Task, TaskId, TaskStatus, TaskTitle},
};

/// Boxed error type for helper results.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming a disposable test database.
pub const TEST_DATABASE_URL_VAR: &str = "TASKMATE_TEST_DATABASE_URL";

/// SQL creating the `tasks` table.
pub const CREATE_TASKS_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tasks/up.sql");

static SCHEMA_READY: OnceLock<Result<(), String>> = OnceLock::new();

/// Returns the test database URL, or `None` when tests should be skipped.
#[must_use]
pub fn test_database_url() -> Option<String> {
    env::var(TEST_DATABASE_URL_VAR)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Applies the schema once per test process, outside any test transaction.
fn ensure_schema(url: &str) -> Result<(), BoxError> {
    SCHEMA_READY
        .get_or_init(|| {
            let mut connection = PgConnection::establish(url).map_err(|err| err.to_string())?;
            connection
                .batch_execute(CREATE_TASKS_SQL)
                .map_err(|err| err.to_string())
        })
        .clone()
        .map_err(Into::into)
}

/// Builds a repository whose single pooled connection runs inside a test
/// transaction that is never committed.
///
/// Returns `Ok(None)` when [`TEST_DATABASE_URL_VAR`] is unset.
///
/// # Errors
///
/// Returns an error if the schema cannot be applied or the pool cannot be
/// built.
pub fn test_repository() -> Result<Option<PostgresTaskRepository>, BoxError> {
    let Some(url) = test_database_url() else {
        return Ok(None);
    };
    ensure_schema(&url)?;
    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(TestCustomizer))
        .build(ConnectionManager::<PgConnection>::new(url))?;
    Ok(Some(PostgresTaskRepository::new(pool)))
}

/// A UTC instant with microsecond precision.
///
/// # Errors
///
/// Returns an error if the components do not form a valid instant.
pub fn instant(
    year: i32,
    month: u32,
    day: u32,
    micros: u32,
) -> Result<DateTime<Utc>, BoxError> {
    let base = Utc
        .with_ymd_and_hms(year, month, day, 12, 30, 0)
        .single()
        .ok_or("ambiguous or invalid instant")?;
    Ok(base + chrono::Duration::microseconds(i64::from(micros)))
}

/// Builds a fully populated task from explicit parts.
///
/// # Errors
///
/// Returns an error if the title is invalid.
pub fn stored_task(title: &str, created_at: DateTime<Utc>) -> Result<Task, BoxError> {
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

/// Calendar date helper.
///
/// # Errors
///
/// Returns an error if the components do not form a valid date.
pub fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, BoxError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| "invalid date".into())
}
