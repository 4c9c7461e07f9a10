//! In-memory adapters backing the offline board.

mod employee;
mod task;

pub use employee::InMemoryEmployeeDirectory;
pub use task::InMemoryTaskRepository;
