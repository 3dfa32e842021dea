//! In-memory adapter implementations.

mod task;

pub use task::InMemoryTaskRepository;
