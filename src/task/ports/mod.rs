//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by the board service.

pub mod directory;
pub mod repository;

pub use directory::EmployeeDirectory;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
