//! Shared world state for task board BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryEmployeeDirectory, InMemoryTaskRepository},
    domain::{Employee, EmployeeId, Task, TaskId},
    services::{PendingDeletion, TaskBoardError, TaskBoardService},
};

/// Service type used by the BDD world.
pub type TestBoardService =
    TaskBoardService<InMemoryTaskRepository, InMemoryEmployeeDirectory, DefaultClock>;

/// Scenario world for task board behaviour tests.
pub struct BoardWorld {
    pub service: TestBoardService,
    pub repository: InMemoryTaskRepository,
    pub current_task: Option<TaskId>,
    pub pending_deletion: Option<PendingDeletion>,
    pub last_drop: Option<Option<Task>>,
    pub last_error: Option<TaskBoardError>,
}

impl BoardWorld {
    /// Creates a world with an empty board and two known employees.
    #[must_use]
    pub fn new() -> Self {
        let repository = InMemoryTaskRepository::new();
        let employees = ["emp-1", "emp-2"]
            .into_iter()
            .filter_map(|raw| EmployeeId::new(raw).ok())
            .map(|id| Employee::new(id, "Scenario Employee"));
        let service = TaskBoardService::new(
            Arc::new(repository.clone()),
            Arc::new(InMemoryEmployeeDirectory::with_employees(employees)),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            repository,
            current_task: None,
            pending_deletion: None,
            last_drop: None,
            last_error: None,
        }
    }

    /// Records the outcome of a board operation, keeping the error for
    /// later assertions.
    pub fn record<T>(&mut self, result: Result<T, TaskBoardError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.last_error = Some(err);
                None
            }
        }
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a task identifier from scenario text.
///
/// # Errors
///
/// Returns an error when the identifier is blank.
pub fn task_id(raw: &str) -> Result<TaskId, eyre::Report> {
    Ok(TaskId::new(raw)?)
}
