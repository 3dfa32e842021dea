//! Shared world state for task manager BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskManager, TaskManagerError},
};

/// Service type used by the BDD world.
pub type TestTaskManager = TaskManager<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task manager behaviour tests.
pub struct TaskManagerWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub manager: TestTaskManager,
    pub last_added_task: Option<Task>,
    pub last_error: Option<TaskManagerError>,
    pub last_lookup: Option<Result<Task, TaskManagerError>>,
}

impl TaskManagerWorld {
    /// Creates a world backed by an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let manager = TaskManager::new(Arc::clone(&repository), Arc::new(DefaultClock));

        Self {
            repository,
            manager,
            last_added_task: None,
            last_error: None,
            last_lookup: None,
        }
    }
}

impl Default for TaskManagerWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskManagerWorld {
    TaskManagerWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
