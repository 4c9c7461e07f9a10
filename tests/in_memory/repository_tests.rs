//! In-memory repository contract tests.

use super::helpers::{employee_id, stored_task, task_id};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{NewTask, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_tasks_get_distinct_identifiers() -> eyre::Result<()> {
    let repository = InMemoryTaskRepository::new();
    let input = NewTask::new("Same title", Some(employee_id("emp-1")))?;

    let first = repository.create(&input).await?;
    let second = repository.create(&input).await?;

    eyre::ensure!(first.id() != second.id());
    eyre::ensure!(first.status() == TaskStatus::Pending);
    eyre::ensure!(repository.list().await?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_returns_the_stored_record() -> eyre::Result<()> {
    let repository = InMemoryTaskRepository::new();
    repository.insert(stored_task("t1", "Update me", TaskStatus::Pending))?;

    let updated = repository
        .update_status(&task_id("t1"), TaskStatus::InProgress)
        .await?;

    eyre::ensure!(updated.map(|task| task.status()) == Some(TaskStatus::InProgress));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_tasks_are_not_found() {
    let repository = InMemoryTaskRepository::new();

    let update = repository
        .update_status(&task_id("ghost"), TaskStatus::Completed)
        .await;
    let delete = repository.delete(&task_id("ghost")).await;

    assert!(matches!(update, Err(TaskRepositoryError::NotFound(_))));
    assert!(matches!(delete, Err(TaskRepositoryError::NotFound(_))));
}
