//! Taskmate: a single-user task tracker.
//!
//! The crate records tasks with a title, optional description and due date,
//! a priority and a workflow status. Tasks are addressed by full or partial
//! identifier and can be filtered, sorted and summarized.
//!
//! # Architecture
//!
//! Taskmate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`config`]: Storage settings read from the environment
//! - [`task`]: Task model, persistence and the task manager service

pub mod config;
pub mod task;
