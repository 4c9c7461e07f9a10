//! End-to-end board flows against the in-memory backend.

use super::helpers::{BoardHarness, employee_id, harness, stored_task, task_id};
use mockable::Clock;
use rstest::rstest;
use taskboard::task::{
    domain::{MoveDirection, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::{
        BoardLayout, CardAction, CreateTaskRequest, DragTracker, LayoutOptions, TaskFilter,
    },
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_walks_the_board(harness: BoardHarness) -> eyre::Result<()> {
    let BoardHarness { board, repository } = harness;
    board.refresh().await?;

    let created = board
        .create_task(
            CreateTaskRequest::new("Onboard new hire", Some("emp-2".to_owned()))
                .with_priority(TaskPriority::Urgent)
                .with_tags(vec!["hr".to_owned()]),
        )
        .await?;
    board.move_task(created.id(), MoveDirection::Forward).await?;
    board.move_task(created.id(), MoveDirection::Forward).await?;
    board.move_task(created.id(), MoveDirection::Back).await?;

    let stored = repository.list().await?;
    eyre::ensure!(stored.len() == 1);
    eyre::ensure!(stored.first().map(|task| task.status()) == Some(TaskStatus::InProgress));

    let layout = BoardLayout::build(
        &board.snapshot()?,
        &TaskFilter::new(),
        &LayoutOptions::new(board.clock().utc()),
    );
    let card = layout
        .lane(TaskStatus::InProgress)
        .and_then(|lane| lane.cards.first())
        .ok_or_else(|| eyre::eyre!("card missing from in-progress lane"))?;
    eyre::ensure!(card.assignee.name == "Ben Ortiz");
    eyre::ensure!(card.tags == ["hr"]);
    eyre::ensure!(card.offers(CardAction::MoveBack) && card.offers(CardAction::MoveForward));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dragged_card_lands_in_the_drop_lane(harness: BoardHarness) -> eyre::Result<()> {
    let BoardHarness { board, repository } = harness;
    repository.insert(stored_task("t1", "Order laptops", TaskStatus::Pending))?;
    board.refresh().await?;

    let layout = BoardLayout::build(
        &board.snapshot()?,
        &TaskFilter::new(),
        &LayoutOptions::new(board.clock().utc()),
    );
    let card = layout
        .lane(TaskStatus::Pending)
        .and_then(|lane| lane.cards.first())
        .ok_or_else(|| eyre::eyre!("card missing from pending lane"))?;

    let mut tracker = DragTracker::new();
    let payload = tracker.start(card)?;
    tracker.enter(TaskStatus::Completed);
    let moved = board.drop_on_lane(&payload, TaskStatus::Completed).await?;
    tracker.finish();

    eyre::ensure!(moved.map(|task| task.status()) == Some(TaskStatus::Completed));
    eyre::ensure!(board.task(&task_id("t1"))?.status() == TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_lane_offers_only_decisions(harness: BoardHarness) -> eyre::Result<()> {
    let BoardHarness { board, repository } = harness;
    repository.insert(stored_task("t1", "Expense claim", TaskStatus::WaitingForApproval))?;
    board.refresh().await?;

    let layout = BoardLayout::build(
        &board.snapshot()?,
        &TaskFilter::new().with_assignee(employee_id("emp-1")),
        &LayoutOptions::new(board.clock().utc()),
    );
    let card = layout
        .lane(TaskStatus::WaitingForApproval)
        .and_then(|lane| lane.cards.first())
        .ok_or_else(|| eyre::eyre!("card missing from review lane"))?;
    eyre::ensure!(card.offers(CardAction::Approve) && card.offers(CardAction::Reject));
    eyre::ensure!(!card.offers(CardAction::MoveForward));

    let rejected = board.reject(&task_id("t1")).await?;
    eyre::ensure!(rejected.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_deletion_removes_the_task_everywhere(
    harness: BoardHarness,
) -> eyre::Result<()> {
    let BoardHarness { board, repository } = harness;
    repository.insert(stored_task("t1", "Old ticket", TaskStatus::Completed))?;
    board.refresh().await?;

    let pending = board.request_delete(&task_id("t1"))?;
    board.confirm_delete(pending).await?;

    eyre::ensure!(board.list_tasks()?.is_empty());
    eyre::ensure!(repository.list().await?.is_empty());
    Ok(())
}
