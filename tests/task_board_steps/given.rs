//! Given steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async, task_id};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use std::collections::BTreeSet;
use taskboard::task::domain::{EmployeeId, PersistedTaskData, Task, TaskPriority, TaskStatus};

#[given("an empty task board")]
fn empty_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.service.refresh()).wrap_err("refresh empty board")
}

#[given(r#"a task "{id}" titled "{title}" in the "{lane}" lane"#)]
fn seeded_task(
    world: &mut BoardWorld,
    id: String,
    title: String,
    lane: String,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(lane.as_str())?;
    let now = Utc::now();
    world.repository.insert(Task::from_persisted(PersistedTaskData {
        id: task_id(&id)?,
        title,
        description: None,
        assigned_to: Some(EmployeeId::new("emp-1")?),
        status,
        priority: TaskPriority::Medium,
        due_date: None,
        tags: BTreeSet::new(),
        created_at: now,
        updated_at: now,
    }))?;
    run_async(world.service.refresh()).wrap_err("refresh seeded board")
}
