//! Task manager service: validated CRUD, identifier resolution and queries.

use super::query::{SortOrder, TaskFilter, TaskStatistics, compute_statistics};
use crate::task::{
    domain::{
        NewTask, Resolution, Task, TaskPatch, ValidationError, resolve,
        validation::{
            validate_description, validate_due_date, validate_priority, validate_status,
            validate_title,
        },
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task from raw caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    title: String,
    priority: String,
    description: Option<String>,
    due_date: Option<String>,
    status: Option<String>,
}

impl AddTaskRequest {
    /// Creates a request with the required title and priority.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: priority.into(),
            description: None,
            due_date: None,
            status: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date as a `YYYY-MM-DD` string.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Sets an initial status instead of the pending default.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn validate(&self) -> Result<NewTask, ValidationError> {
        let title = validate_title(&self.title)?;
        let description = validate_description(self.description.as_deref())?;
        let due_date = self
            .due_date
            .as_deref()
            .map(validate_due_date)
            .transpose()?;
        let priority = validate_priority(&self.priority)?;
        let status = self
            .status
            .as_deref()
            .map(validate_status)
            .transpose()?
            .unwrap_or_default();

        Ok(NewTask {
            title,
            description,
            due_date,
            priority,
            status,
        })
    }
}

/// Request payload for changing some fields of an existing task.
///
/// Fields never set on the request are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    due_date: Option<Option<String>>,
    priority: Option<String>,
    status: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the due date with a `YYYY-MM-DD` string.
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    /// Removes the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns `true` when the request changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.status.is_none()
    }

    /// Validates every supplied field before any of them is applied.
    fn validate(&self) -> Result<TaskPatch, ValidationError> {
        let mut patch = TaskPatch::new();
        if let Some(title) = self.title.as_deref() {
            patch = patch.with_title(validate_title(title)?);
        }
        if let Some(description) = self.description.as_ref() {
            patch = patch.with_description(validate_description(description.as_deref())?);
        }
        if let Some(due_date) = self.due_date.as_ref() {
            let parsed = due_date.as_deref().map(validate_due_date).transpose()?;
            patch = patch.with_due_date(parsed);
        }
        if let Some(priority) = self.priority.as_deref() {
            patch = patch.with_priority(validate_priority(priority)?);
        }
        if let Some(status) = self.status.as_deref() {
            patch = patch.with_status(validate_status(status)?);
        }
        Ok(patch)
    }
}

/// Service-level errors for task manager operations.
#[derive(Debug, Error)]
pub enum TaskManagerError {
    /// A supplied field failed validation; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No task matched the query.
    #[error("no task matches '{query}'")]
    NotFound {
        /// The query as supplied by the caller.
        query: String,
    },

    /// Several tasks matched a partial identifier.
    #[error("'{query}' matches {} tasks, supply more characters", matches.len())]
    AmbiguousMatch {
        /// The query as supplied by the caller.
        query: String,
        /// Every task whose identifier starts with the query.
        matches: Vec<Task>,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskManagerError {
    /// Returns `true` for not-found outcomes from either the resolver or the
    /// repository.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Repository(TaskRepositoryError::NotFound(_))
        )
    }
}

/// Result type for task manager operations.
pub type TaskManagerResult<T> = Result<T, TaskManagerError>;

/// Task orchestration service.
///
/// The task collection is fetched fresh from the repository for every
/// operation that needs it; nothing is cached between calls.
#[derive(Clone)]
pub struct TaskManager<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskManager<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task manager.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates the request, creates a task and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Validation`] for invalid input or
    /// [`TaskManagerError::Repository`] when the repository rejects the
    /// insert.
    pub async fn add_task(&self, request: AddTaskRequest) -> TaskManagerResult<Task> {
        let new_task = request.validate()?;
        let task = Task::new(new_task, &*self.clock);
        self.repository.insert(&task).await?;
        info!(task_id = %task.id(), title = %task.title(), "task created");
        Ok(task)
    }

    /// Finds a task by full or partial identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::NotFound`] or
    /// [`TaskManagerError::AmbiguousMatch`] when the query does not identify
    /// exactly one task, or [`TaskManagerError::Repository`] when the
    /// repository fails.
    pub async fn get_task(&self, query: &str) -> TaskManagerResult<Task> {
        self.resolve(query).await
    }

    /// Applies the supplied field changes to the task matching `query`.
    ///
    /// Every supplied field is validated before anything is applied. A
    /// request carrying no fields returns the task unchanged without
    /// writing to the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Validation`] when any field is invalid,
    /// a resolver error when `query` does not identify exactly one task, or
    /// [`TaskManagerError::Repository`] when persistence fails.
    pub async fn update_task(
        &self,
        query: &str,
        request: UpdateTaskRequest,
    ) -> TaskManagerResult<Task> {
        let patch = request.validate()?;
        let mut task = self.resolve(query).await?;
        if !task.apply(patch, &*self.clock) {
            debug!(task_id = %task.id(), "empty update, nothing to persist");
            return Ok(task);
        }
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), "task updated");
        Ok(task)
    }

    /// Marks the task matching `query` as completed.
    ///
    /// Completing a task that is already completed succeeds like any other
    /// update.
    ///
    /// # Errors
    ///
    /// Returns a resolver error when `query` does not identify exactly one
    /// task, or [`TaskManagerError::Repository`] when persistence fails.
    pub async fn complete_task(&self, query: &str) -> TaskManagerResult<Task> {
        let mut task = self.resolve(query).await?;
        task.complete(&*self.clock);
        self.repository.update(&task).await?;
        info!(task_id = %task.id(), "task completed");
        Ok(task)
    }

    /// Permanently removes the task matching `query` and returns it.
    ///
    /// # Errors
    ///
    /// Returns a resolver error when `query` does not identify exactly one
    /// task, or [`TaskManagerError::Repository`] when persistence fails.
    pub async fn delete_task(&self, query: &str) -> TaskManagerResult<Task> {
        let task = self.resolve(query).await?;
        self.repository.delete(task.id()).await?;
        info!(task_id = %task.id(), "task deleted");
        Ok(task)
    }

    /// Returns every task, optionally sorted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Repository`] when the repository fails.
    pub async fn list_tasks(&self, order: Option<SortOrder>) -> TaskManagerResult<Vec<Task>> {
        let mut tasks = self.repository.get_all().await?;
        if let Some(sort_order) = order {
            sort_order.apply(&mut tasks);
        }
        Ok(tasks)
    }

    /// Returns the tasks satisfying every criterion in `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Repository`] when the repository fails.
    pub async fn filter_tasks(&self, filter: &TaskFilter) -> TaskManagerResult<Vec<Task>> {
        let tasks = self.repository.get_all().await?;
        let matching = filter.apply(tasks);
        debug!(matches = matching.len(), "filtered tasks");
        Ok(matching)
    }

    /// Computes statistics over `tasks` relative to today's UTC date.
    #[must_use]
    pub fn get_statistics(&self, tasks: &[Task]) -> TaskStatistics {
        compute_statistics(tasks, self.clock.utc().date_naive())
    }

    /// Computes statistics over every stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskManagerError::Repository`] when the repository fails.
    pub async fn statistics(&self) -> TaskManagerResult<TaskStatistics> {
        let tasks = self.repository.get_all().await?;
        Ok(self.get_statistics(&tasks))
    }

    async fn resolve(&self, query: &str) -> TaskManagerResult<Task> {
        let candidates = self.repository.get_all().await?;
        match resolve(query, &candidates) {
            Resolution::Found(task) => {
                debug!(query, task_id = %task.id(), "resolved task");
                Ok(task)
            }
            Resolution::NotFound => Err(TaskManagerError::NotFound {
                query: query.to_owned(),
            }),
            Resolution::Ambiguous(matches) => {
                warn!(query, matches = matches.len(), "ambiguous task query");
                Err(TaskManagerError::AmbiguousMatch {
                    query: query.to_owned(),
                    matches,
                })
            }
        }
    }
}
