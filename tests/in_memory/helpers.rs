//! Shared test helpers for in-memory board integration tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::task::{
    adapters::memory::{InMemoryEmployeeDirectory, InMemoryTaskRepository},
    domain::{Employee, EmployeeId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    services::TaskBoardService,
};

/// Board service over in-memory adapters.
pub type MemoryBoard =
    TaskBoardService<InMemoryTaskRepository, InMemoryEmployeeDirectory, DefaultClock>;

/// Board wired to a repository the test can seed directly.
pub struct BoardHarness {
    pub board: MemoryBoard,
    pub repository: InMemoryTaskRepository,
}

/// Provides a fresh board with two employees and no tasks.
#[fixture]
pub fn harness() -> BoardHarness {
    let repository = InMemoryTaskRepository::new();
    let directory = InMemoryEmployeeDirectory::with_employees([
        Employee::new(employee_id("emp-1"), "Asha Rao"),
        Employee::new(employee_id("emp-2"), "Ben Ortiz"),
    ]);
    let board = TaskBoardService::new(
        Arc::new(repository.clone()),
        Arc::new(directory),
        Arc::new(DefaultClock),
    );
    BoardHarness { board, repository }
}

/// Parses an employee identifier fixture.
///
/// # Panics
///
/// Panics if `raw` is blank.
#[must_use]
pub fn employee_id(raw: &str) -> EmployeeId {
    EmployeeId::new(raw).expect("valid employee id")
}

/// Parses a task identifier fixture.
///
/// # Panics
///
/// Panics if `raw` is blank.
#[must_use]
pub fn task_id(raw: &str) -> TaskId {
    TaskId::new(raw).expect("valid task id")
}

/// Builds a stored task in `status`, assigned to `emp-1`.
#[must_use]
pub fn stored_task(id: &str, title: &str, status: TaskStatus) -> Task {
    let now = Utc::now();
    Task::from_persisted(PersistedTaskData {
        id: task_id(id),
        title: title.to_owned(),
        description: None,
        assigned_to: Some(employee_id("emp-1")),
        status,
        priority: TaskPriority::Medium,
        due_date: None,
        tags: BTreeSet::new(),
        created_at: now,
        updated_at: now,
    })
}
