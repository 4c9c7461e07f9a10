//! In-memory task repository for offline boards and tests.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are generated from the creation timestamp plus a sequence
/// number, so two tasks created within the same millisecond stay distinct.
pub struct InMemoryTaskRepository<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: Vec<Task>,
    next_sequence: u64,
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty in-memory repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty repository using the given clock.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    /// Inserts an existing task, replacing any task with the same id.
    ///
    /// Used to seed fixtures, including tasks in statuses the board cannot
    /// reach on its own such as `waiting-for-approval`.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn insert(&self, task: Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        match state.tasks.iter_mut().find(|stored| stored.id() == task.id()) {
            Some(existing) => *existing = task,
            None => state.tasks.push(task),
        }
        Ok(())
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Builds a timestamp-based identifier.
fn generate_id(millis: i64, sequence: u64) -> TaskRepositoryResult<TaskId> {
    TaskId::new(format!("task-{millis}-{sequence}")).map_err(TaskRepositoryError::persistence)
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.clone())
    }

    async fn create(&self, input: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write_state()?;
        let sequence = state.next_sequence;
        state.next_sequence = sequence.saturating_add(1);

        let id = generate_id(self.clock.utc().timestamp_millis(), sequence)?;
        let task = Task::create(id, input, &*self.clock);
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write_state()?;
        let task = state
            .tasks
            .iter_mut()
            .find(|stored| stored.id() == id)
            .ok_or_else(|| TaskRepositoryError::NotFound(id.clone()))?;
        task.apply_status(status, &*self.clock);
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        let before = state.tasks.len();
        state.tasks.retain(|stored| stored.id() != id);
        if state.tasks.len() == before {
            return Err(TaskRepositoryError::NotFound(id.clone()));
        }
        Ok(())
    }
}
