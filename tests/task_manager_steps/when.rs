//! When steps for task manager BDD scenarios.

use super::world::{TaskManagerWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskmate::task::services::AddTaskRequest;

#[when(r#"a task titled "{title}" is added with priority "{priority}""#)]
fn add_task(world: &mut TaskManagerWorld, title: String, priority: String) {
    match run_async(world.manager.add_task(AddTaskRequest::new(title, priority))) {
        Ok(task) => world.last_added_task = Some(task),
        Err(err) => world.last_error = Some(err),
    }
}

#[when("the last added task is completed")]
fn complete_last_added(world: &mut TaskManagerWorld) -> Result<(), eyre::Report> {
    let task = world
        .last_added_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing added task in scenario world"))?;

    let completed = run_async(world.manager.complete_task(&task.id().to_string()))
        .wrap_err("complete task in scenario")?;
    world.last_added_task = Some(completed);
    Ok(())
}

#[when(r#"the task "{query}" is looked up"#)]
fn look_up_task(world: &mut TaskManagerWorld, query: String) {
    world.last_lookup = Some(run_async(world.manager.get_task(&query)));
}
