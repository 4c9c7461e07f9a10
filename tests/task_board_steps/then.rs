//! Then steps for task board BDD scenarios.

use super::world::{BoardWorld, task_id};
use mockable::Clock;
use rstest_bdd_macros::then;
use taskboard::task::{
    domain::TaskStatus,
    services::{BoardLayout, LayoutOptions, TaskFilter},
};

fn expect_status(world: &BoardWorld, id: &str, lane: &str) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(lane)?;
    let task = world.service.task(&task_id(id)?)?;
    eyre::ensure!(
        task.status() == expected,
        "expected {expected}, found {}",
        task.status()
    );
    Ok(())
}

#[then(r#"the task is in the "{lane}" lane"#)]
fn current_task_in_lane(world: &BoardWorld, lane: String) -> Result<(), eyre::Report> {
    let id = world
        .current_task
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))?;
    expect_status(world, id.as_str(), &lane)
}

#[then(r#"the task "{id}" is in the "{lane}" lane"#)]
fn named_task_in_lane(world: &BoardWorld, id: String, lane: String) -> Result<(), eyre::Report> {
    expect_status(world, &id, &lane)
}

#[then(r#"the board shows "{line}""#)]
fn board_shows(world: &BoardWorld, line: String) -> Result<(), eyre::Report> {
    let layout = BoardLayout::build(
        &world.service.snapshot()?,
        &TaskFilter::new(),
        &LayoutOptions::new(world.service.clock().utc()),
    );
    let shown = layout.summary.showing_line();
    eyre::ensure!(shown == line, "expected '{line}', found '{shown}'");
    Ok(())
}

#[then("the board holds {count:usize} tasks")]
fn board_holds(world: &BoardWorld, count: usize) -> Result<(), eyre::Report> {
    let held = world.service.list_tasks()?.len();
    eyre::ensure!(held == count, "expected {count} tasks, found {held}");
    Ok(())
}

#[then(r#"the request fails with "{message}""#)]
fn request_fails(world: &BoardWorld, message: String) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a failed request"))?;
    eyre::ensure!(
        err.user_message() == message,
        "unexpected failure '{}'",
        err.user_message()
    );
    Ok(())
}

#[then("the drop is ignored")]
fn drop_ignored(world: &BoardWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(world.last_error.is_none(), "drop failed: {:?}", world.last_error);
    eyre::ensure!(
        matches!(world.last_drop, Some(None)),
        "expected an ignored drop, got {:?}",
        world.last_drop
    );
    Ok(())
}
