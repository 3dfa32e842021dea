//! Application services for task tracking.

mod manager;
pub mod query;

pub use manager::{
    AddTaskRequest, TaskManager, TaskManagerError, TaskManagerResult, UpdateTaskRequest,
};
pub use query::{
    DueDateFilter, ParseSortOrderError, PriorityCounts, SortDirection, SortKey, SortOrder,
    StatusCounts, TaskFilter, TaskStatistics, compute_statistics, sort_tasks,
};
