//! Persistence adapters for the task module.
//!
//! Concrete implementations of the [`TaskRepository`] port. Adapters own all
//! infrastructure concerns while the domain stays pure.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage for
//!   tests and throwaway sessions
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel ORM
//!
//! [`TaskRepository`]: crate::task::ports::TaskRepository

pub mod memory;
pub mod postgres;
