//! Board service tests against the in-memory adapters.

use rstest::rstest;

use super::support::{MemoryBoard, seeded_board, task_in};
use crate::task::{
    domain::{MoveDirection, MoveIntent, TaskDomainError, TaskId, TaskPriority, TaskStatus},
    ports::TaskRepository,
    services::{CreateTaskRequest, SyncState, TaskBoardError},
};

async fn empty_board() -> MemoryBoard {
    seeded_board(Vec::new()).await.0
}

fn id(raw: &str) -> TaskId {
    TaskId::new(raw).expect("valid task id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_appends_pending_task_with_defaults() -> eyre::Result<()> {
    let board = empty_board().await;
    let request = CreateTaskRequest::new("Write quarterly report", Some("emp-1".to_owned()))
        .with_description("Numbers for Q2")
        .with_priority(TaskPriority::High);

    let created = board.create_task(request).await?;

    eyre::ensure!(created.status() == TaskStatus::Pending);
    eyre::ensure!(created.priority() == TaskPriority::High);
    eyre::ensure!(created.assigned_to().map(|emp| emp.as_str()) == Some("emp-1"));
    eyre::ensure!(board.list_tasks()? == vec![created]);
    Ok(())
}

#[rstest]
#[case(CreateTaskRequest::new("   ", Some("emp-1".to_owned())), TaskDomainError::EmptyTitle)]
#[case(CreateTaskRequest::new("Plan offsite", None), TaskDomainError::MissingAssignee)]
#[case(
    CreateTaskRequest::new("Plan offsite", Some("  ".to_owned())),
    TaskDomainError::MissingAssignee
)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_adds_nothing(
    #[case] request: CreateTaskRequest,
    #[case] expected: TaskDomainError,
) -> eyre::Result<()> {
    let board = empty_board().await;

    let result = board.create_task(request).await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Validation(ref err)) if *err == expected
    ));
    eyre::ensure!(board.list_tasks()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_forward_twice_reaches_completed() -> eyre::Result<()> {
    let board = empty_board().await;
    let created = board
        .create_task(CreateTaskRequest::new("Ship v2", Some("emp-2".to_owned())))
        .await?;

    let first = board.move_task(created.id(), MoveDirection::Forward).await?;
    let second = board.move_task(created.id(), MoveDirection::Forward).await?;
    let third = board.move_task(created.id(), MoveDirection::Forward).await?;

    eyre::ensure!(first.status() == TaskStatus::InProgress);
    eyre::ensure!(second.status() == TaskStatus::Completed);
    eyre::ensure!(third.status() == TaskStatus::Completed, "forward from completed is a no-op");
    eyre::ensure!(board.sync_state(created.id())? == SyncState::Confirmed);
    Ok(())
}

#[rstest]
#[case(TaskStatus::Pending, MoveDirection::Back)]
#[case(TaskStatus::Completed, MoveDirection::Forward)]
#[case(TaskStatus::WaitingForApproval, MoveDirection::Forward)]
#[tokio::test(flavor = "multi_thread")]
async fn unavailable_moves_leave_the_task_untouched(
    #[case] status: TaskStatus,
    #[case] direction: MoveDirection,
) -> eyre::Result<()> {
    let (board, _) = seeded_board(vec![task_in("t1", "Edge", status)]).await;

    let task = board.move_task(&id("t1"), direction).await?;

    eyre::ensure!(task.status() == status);
    eyre::ensure!(board.task(&id("t1"))?.status() == status);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_changes_reach_the_repository() -> eyre::Result<()> {
    let (board, repository) =
        seeded_board(vec![task_in("t1", "Sync", TaskStatus::Pending)]).await;

    board.set_status(&id("t1"), TaskStatus::InProgress).await?;

    let stored = repository.list().await?;
    eyre::ensure!(stored.first().map(|task| task.status()) == Some(TaskStatus::InProgress));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn set_status_on_unknown_task_is_not_found() {
    let board = empty_board().await;
    let result = board.set_status(&id("ghost"), TaskStatus::Completed).await;
    assert!(matches!(
        result,
        Err(TaskBoardError::NotFound(ref missing)) if missing.as_str() == "ghost"
    ));
}

#[rstest]
#[case(true, TaskStatus::Completed)]
#[case(false, TaskStatus::InProgress)]
#[tokio::test(flavor = "multi_thread")]
async fn approval_gate_resolves_waiting_tasks(
    #[case] approve: bool,
    #[case] expected: TaskStatus,
) -> eyre::Result<()> {
    let (board, _) =
        seeded_board(vec![task_in("t1", "Review deck", TaskStatus::WaitingForApproval)]).await;

    let task = if approve {
        board.approve(&id("t1")).await?
    } else {
        board.reject(&id("t1")).await?
    };

    eyre::ensure!(task.status() == expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approval_outside_review_is_rejected() -> eyre::Result<()> {
    let (board, _) = seeded_board(vec![task_in("t1", "Draft", TaskStatus::InProgress)]).await;

    let result = board.approve(&id("t1")).await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Validation(TaskDomainError::NotAwaitingApproval { .. }))
    ));
    eyre::ensure!(board.task(&id("t1"))?.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_on_the_source_lane_is_a_no_op() -> eyre::Result<()> {
    let (board, _) = seeded_board(vec![task_in("t1", "Stay", TaskStatus::InProgress)]).await;
    let intent = MoveIntent::new(id("t1"), TaskStatus::InProgress);

    let outcome = board.drop_intent(&intent, TaskStatus::InProgress).await?;

    eyre::ensure!(outcome.is_none());
    eyre::ensure!(board.task(&id("t1"))?.status() == TaskStatus::InProgress);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_skips_lanes_in_one_step() -> eyre::Result<()> {
    let (board, _) = seeded_board(vec![task_in("t1", "Jump", TaskStatus::Pending)]).await;
    let payload = MoveIntent::new(id("t1"), TaskStatus::Pending).to_payload()?;

    let moved = board.drop_on_lane(&payload, TaskStatus::Completed).await?;

    eyre::ensure!(moved.map(|task| task.status()) == Some(TaskStatus::Completed));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_drop_payload_changes_nothing() -> eyre::Result<()> {
    let (board, _) = seeded_board(vec![task_in("t1", "Jump", TaskStatus::Pending)]).await;

    let result = board.drop_on_lane("{}", TaskStatus::Completed).await;

    eyre::ensure!(matches!(
        result,
        Err(TaskBoardError::Validation(TaskDomainError::MalformedMoveIntent(_)))
    ));
    eyre::ensure!(board.task(&id("t1"))?.status() == TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_requires_confirmation() -> eyre::Result<()> {
    let (board, repository) = seeded_board(vec![
        task_in("t1", "Keep me", TaskStatus::Pending),
        task_in("t2", "Remove me", TaskStatus::Pending),
    ])
    .await;

    let cancelled = board.request_delete(&id("t1"))?;
    eyre::ensure!(cancelled.title() == "Keep me");
    board.cancel_delete(cancelled);
    eyre::ensure!(board.list_tasks()?.len() == 2);

    let confirmed = board.request_delete(&id("t2"))?;
    board.confirm_delete(confirmed).await?;

    let remaining: Vec<_> = board
        .list_tasks()?
        .iter()
        .map(|task| task.id().as_str().to_owned())
        .collect();
    eyre::ensure!(remaining == ["t1"]);
    eyre::ensure!(repository.list().await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_already_gone_remotely_still_removes_it() -> eyre::Result<()> {
    let (board, repository) =
        seeded_board(vec![task_in("t1", "Stale", TaskStatus::Pending)]).await;
    repository.delete(&id("t1")).await?;

    let pending = board.request_delete(&id("t1"))?;
    board.confirm_delete(pending).await?;

    eyre::ensure!(board.list_tasks()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn refresh_loads_employees_for_the_snapshot() -> eyre::Result<()> {
    let (board, _) = seeded_board(vec![task_in("t1", "Owned", TaskStatus::Pending)]).await;

    let snapshot = board.snapshot()?;
    let owner = snapshot
        .tasks
        .first()
        .and_then(|task| task.assigned_to())
        .and_then(|emp| snapshot.employee(emp))
        .map(|emp| emp.name().to_owned());

    eyre::ensure!(owner.as_deref() == Some("Asha Rao"));
    eyre::ensure!(board.employees()?.len() == 2);
    Ok(())
}
