//! Then steps for task manager BDD scenarios.

use super::world::{TaskManagerWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::then;
use taskmate::task::{
    domain::{Priority, TaskStatus},
    services::{TaskManagerError, TaskStatistics},
};

fn current_statistics(world: &TaskManagerWorld) -> Result<TaskStatistics, eyre::Report> {
    run_async(world.manager.statistics()).wrap_err("compute statistics in scenario")
}

fn expect_count(label: &str, expected: u32, actual: usize) -> Result<(), eyre::Report> {
    if usize::try_from(expected)? != actual {
        return Err(eyre::eyre!("expected {expected} {label}, found {actual}"));
    }
    Ok(())
}

#[then("the statistics report {count:u32} tasks in total")]
fn total_is(world: &TaskManagerWorld, count: u32) -> Result<(), eyre::Report> {
    let stats = current_statistics(world)?;
    expect_count("tasks in total", count, stats.total)
}

#[then(r#"the statistics report {count:u32} tasks with status "{status}""#)]
fn status_count_is(
    world: &TaskManagerWorld,
    count: u32,
    status: String,
) -> Result<(), eyre::Report> {
    let parsed = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    let stats = current_statistics(world)?;
    expect_count(parsed.as_str(), count, stats.by_status.get(parsed))
}

#[then(r#"the statistics report {count:u32} tasks with priority "{priority}""#)]
fn priority_count_is(
    world: &TaskManagerWorld,
    count: u32,
    priority: String,
) -> Result<(), eyre::Report> {
    let parsed = Priority::try_from(priority.as_str())
        .map_err(|err| eyre::eyre!("invalid priority in scenario: {err}"))?;
    let stats = current_statistics(world)?;
    expect_count(parsed.as_str(), count, stats.by_priority.get(parsed))
}

#[then(r#"the last operation fails validating "{field}""#)]
fn last_operation_failed_validation(
    world: &TaskManagerWorld,
    field: String,
) -> Result<(), eyre::Report> {
    let Some(TaskManagerError::Validation(error)) = world.last_error.as_ref() else {
        return Err(eyre::eyre!(
            "expected a validation error, got {:?}",
            world.last_error
        ));
    };
    if error.field().as_str() != field {
        return Err(eyre::eyre!(
            "expected {field} to fail validation, but {} failed",
            error.field()
        ));
    }
    Ok(())
}

#[then("the lookup is ambiguous with {count:u32} candidates")]
fn lookup_is_ambiguous(world: &TaskManagerWorld, count: u32) -> Result<(), eyre::Report> {
    let result = world
        .last_lookup
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing lookup result"))?;

    let Err(TaskManagerError::AmbiguousMatch { matches, .. }) = result else {
        return Err(eyre::eyre!("expected an ambiguous match, got {result:?}"));
    };
    expect_count("candidates", count, matches.len())
}

#[then(r#"the lookup finds the task "{id}""#)]
fn lookup_finds(world: &TaskManagerWorld, id: String) -> Result<(), eyre::Report> {
    let result = world
        .last_lookup
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing lookup result"))?;

    match result {
        Ok(task) if task.id().to_string() == id => Ok(()),
        other => Err(eyre::eyre!("expected task {id}, got {other:?}")),
    }
}
