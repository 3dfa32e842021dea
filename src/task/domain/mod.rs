//! Domain model for task tracking.
//!
//! The task domain holds the validated task entity, its field rules and the
//! identifier resolver, keeping every infrastructure concern outside the
//! domain boundary.

mod error;
mod fields;
mod ids;
mod priority;
mod resolver;
mod status;
mod task;
pub mod validation;

pub use error::{TaskField, ValidationError};
pub use fields::{MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH, TaskDescription, TaskTitle};
pub use ids::TaskId;
pub use priority::Priority;
pub use resolver::{Resolution, resolve};
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch};
