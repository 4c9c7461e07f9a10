//! Shared fixtures for task board unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::task::{
    adapters::memory::{InMemoryEmployeeDirectory, InMemoryTaskRepository},
    domain::{Employee, EmployeeId, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus},
    services::TaskBoardService,
};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock(pub(super) DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(super) type MemoryBoard =
    TaskBoardService<InMemoryTaskRepository<FixedClock>, InMemoryEmployeeDirectory, FixedClock>;

pub(super) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

pub(super) fn employee(id: &str, name: &str) -> Employee {
    Employee::new(EmployeeId::new(id).expect("valid employee id"), name)
}

pub(super) fn task_in(id: &str, title: &str, status: TaskStatus) -> Task {
    Task::from_persisted(task_data(id, title, status))
}

/// Persisted data for a task assigned to `emp-1`, without due date.
pub(super) fn task_data(id: &str, title: &str, status: TaskStatus) -> PersistedTaskData {
    PersistedTaskData {
        id: TaskId::new(id).expect("valid task id"),
        title: title.to_owned(),
        description: None,
        assigned_to: Some(EmployeeId::new("emp-1").expect("valid employee id")),
        status,
        priority: TaskPriority::Medium,
        due_date: None,
        tags: std::collections::BTreeSet::new(),
        created_at: fixed_now(),
        updated_at: fixed_now(),
    }
}

/// Builds a board over in-memory adapters seeded with `tasks`, refreshed
/// and ready to use.
pub(super) async fn seeded_board(
    tasks: Vec<Task>,
) -> (MemoryBoard, InMemoryTaskRepository<FixedClock>) {
    let clock = Arc::new(FixedClock(fixed_now()));
    let repository = InMemoryTaskRepository::with_clock(Arc::clone(&clock));
    for task in tasks {
        repository.insert(task).expect("seed task");
    }
    let directory = InMemoryEmployeeDirectory::with_employees([
        employee("emp-1", "Asha Rao"),
        employee("emp-2", "Ben Ortiz"),
    ]);
    let board = TaskBoardService::new(Arc::new(repository.clone()), Arc::new(directory), clock);
    board.refresh().await.expect("initial refresh");
    (board, repository)
}
