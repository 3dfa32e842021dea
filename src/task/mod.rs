//! Task tracking: validated task records, identifier resolution, and the
//! filtering, sorting and statistics engine.
//!
//! The module follows hexagonal architecture:
//!
//! - Domain types and validation rules in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
