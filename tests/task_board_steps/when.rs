//! When steps for task board BDD scenarios.

use super::world::{BoardWorld, run_async, task_id};
use rstest_bdd_macros::when;
use taskboard::task::{
    domain::{MoveDirection, MoveIntent, TaskStatus},
    services::CreateTaskRequest,
};

#[when(r#"a task titled "{title}" is created for "{assignee}""#)]
fn create_task(world: &mut BoardWorld, title: String, assignee: String) {
    let result = run_async(
        world
            .service
            .create_task(CreateTaskRequest::new(title, Some(assignee))),
    );
    if let Some(created) = world.record(result) {
        world.current_task = Some(created.id().clone());
    }
}

#[when(r#"a task titled "{title}" is created without an assignee"#)]
fn create_unassigned_task(world: &mut BoardWorld, title: String) {
    let result = run_async(world.service.create_task(CreateTaskRequest::new(title, None)));
    world.record(result);
}

#[when("the task is moved forward")]
fn move_forward(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let id = world
        .current_task
        .clone()
        .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))?;
    let result = run_async(world.service.move_task(&id, MoveDirection::Forward));
    world.record(result);
    Ok(())
}

#[when(r#"the task "{id}" is dragged onto the "{lane}" lane"#)]
fn drag_task(world: &mut BoardWorld, id: String, lane: String) -> Result<(), eyre::Report> {
    let task = world.service.task(&task_id(&id)?)?;
    let payload = MoveIntent::new(task.id().clone(), task.status()).to_payload()?;
    let target = TaskStatus::try_from(lane.as_str())?;
    let result = run_async(world.service.drop_on_lane(&payload, target));
    world.last_drop = world.record(result);
    Ok(())
}

#[when(r#"the task "{id}" is approved"#)]
fn approve_task(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    let result = run_async(world.service.approve(&task_id(&id)?));
    world.record(result);
    Ok(())
}

#[when(r#"the task "{id}" is rejected"#)]
fn reject_task(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    let result = run_async(world.service.reject(&task_id(&id)?));
    world.record(result);
    Ok(())
}

#[when(r#"deletion of task "{id}" is requested"#)]
fn request_deletion(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    world.pending_deletion = Some(world.service.request_delete(&task_id(&id)?)?);
    Ok(())
}

#[when("the deletion is cancelled")]
fn cancel_deletion(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let pending = world
        .pending_deletion
        .take()
        .ok_or_else(|| eyre::eyre!("no deletion awaiting confirmation"))?;
    world.service.cancel_delete(pending);
    Ok(())
}

#[when("the deletion is confirmed")]
fn confirm_deletion(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    let pending = world
        .pending_deletion
        .take()
        .ok_or_else(|| eyre::eyre!("no deletion awaiting confirmation"))?;
    let result = run_async(world.service.confirm_delete(pending));
    world.record(result);
    Ok(())
}
