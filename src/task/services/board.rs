//! Task store and status transition controller.
//!
//! [`TaskBoardService`] owns the authoritative local copy of the task
//! collection for a board session. Every mutation is applied locally first
//! and then sent to the [`TaskRepository`]; readers see the optimistic value
//! immediately. Each mutated task carries a [`SyncState`] until the remote
//! side answers.

use crate::task::{
    domain::{
        ApprovalDecision, Employee, EmployeeId, MoveDirection, MoveIntent, NewTask, Task,
        TaskDomainError, TaskId, TaskPriority, TaskStatus,
    },
    ports::{EmployeeDirectory, TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Request payload for creating a task from the board form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    assigned_to: Option<String>,
    description: Option<String>,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the form's required fields.
    ///
    /// Validation happens when the request is submitted, so an empty title
    /// or missing assignee is accepted here.
    #[must_use]
    pub fn new(title: impl Into<String>, assigned_to: Option<String>) -> Self {
        Self {
            title: title.into(),
            assigned_to,
            description: None,
            priority: TaskPriority::default(),
            due_date: None,
            tags: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    fn into_new_task(self) -> Result<NewTask, TaskDomainError> {
        let assignee = self
            .assigned_to
            .filter(|value| !value.trim().is_empty())
            .map(EmployeeId::new)
            .transpose()?;

        let mut input = NewTask::new(self.title, assignee)?
            .with_priority(self.priority)
            .with_tags(self.tags);
        if let Some(description) = self.description {
            input = input.with_description(description);
        }
        if let Some(due_date) = self.due_date {
            input = input.with_due_date(due_date);
        }
        Ok(input)
    }
}

/// Remote confirmation state of a task in the local store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState {
    /// The local value matches the last remote answer.
    #[default]
    Confirmed,
    /// A local change is waiting for the remote answer.
    Pending,
    /// The remote side rejected the last local change, which is still shown.
    Failed {
        /// User-facing reason.
        message: String,
    },
}

/// What to do with an optimistic status change the remote side rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncFailurePolicy {
    /// Keep the optimistic value and mark the task [`SyncState::Failed`].
    #[default]
    Keep,
    /// Restore the last confirmed status.
    Revert,
}

impl TryFrom<&str> for SyncFailurePolicy {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "revert" => Ok(Self::Revert),
            other => Err(format!("unknown sync failure policy '{other}'")),
        }
    }
}

/// Confirmation token for a requested deletion.
///
/// Only [`TaskBoardService::request_delete`] creates one, and only
/// [`TaskBoardService::confirm_delete`] turns it into a removal.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a deletion only happens once it is confirmed"]
pub struct PendingDeletion {
    task_id: TaskId,
    title: String,
}

impl PendingDeletion {
    /// Returns the task awaiting deletion.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the title to show in the confirmation prompt.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Consistent copy of the store for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Tasks in store order.
    pub tasks: Vec<Task>,
    /// Sync state per task. Tasks without an entry are confirmed.
    pub sync_states: HashMap<TaskId, SyncState>,
    /// Employees known to the board.
    pub employees: Vec<Employee>,
}

impl BoardSnapshot {
    /// Returns the sync state of a task.
    #[must_use]
    pub fn sync_state(&self, id: &TaskId) -> SyncState {
        self.sync_states.get(id).cloned().unwrap_or_default()
    }

    /// Resolves an employee by id.
    #[must_use]
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id() == id)
    }
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// Input or transition validation failed.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),
    /// No task with the given id is known.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// The remote side refused the operation for this session.
    #[error("permission denied")]
    Permission(#[source] TaskRepositoryError),
    /// The session has no valid credentials.
    #[error("authentication required")]
    Unauthenticated,
    /// The remote side could not be reached or failed.
    #[error("network failure")]
    Network(#[source] TaskRepositoryError),
    /// Any other repository failure.
    #[error(transparent)]
    Repository(TaskRepositoryError),
    /// The local store lock was poisoned.
    #[error("local task store is unavailable")]
    StoreUnavailable,
}

impl From<TaskRepositoryError> for TaskBoardError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::PermissionDenied(_) => Self::Permission(err),
            TaskRepositoryError::Unauthenticated => Self::Unauthenticated,
            TaskRepositoryError::Network(_) => Self::Network(err),
            TaskRepositoryError::Rejected { .. }
            | TaskRepositoryError::InvalidResponse(_)
            | TaskRepositoryError::Persistence(_) => Self::Repository(err),
        }
    }
}

impl TaskBoardError {
    /// Returns the message shown in the board's error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::NotFound(_) => "This task no longer exists.".to_owned(),
            Self::Permission(_) => "You don't have permission to perform this action.".to_owned(),
            Self::Unauthenticated => "Your session has expired. Please sign in again.".to_owned(),
            Self::Network(_) => "Failed to reach the server. Please try again.".to_owned(),
            Self::Repository(_) | Self::StoreUnavailable => {
                "The task board could not complete the request.".to_owned()
            }
        }
    }
}

/// Result type for board service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

#[derive(Debug, Default)]
struct BoardStore {
    entries: Vec<StoreEntry>,
    employees: Vec<Employee>,
}

/// Local copy of a task plus the bookkeeping for optimistic updates.
///
/// Every local status change bumps `generation`. A remote answer only
/// settles the entry when it carries the current generation.
#[derive(Debug)]
struct StoreEntry {
    task: Task,
    sync: SyncState,
    generation: u64,
    confirmed_status: TaskStatus,
    confirmed_generation: u64,
}

impl StoreEntry {
    fn confirmed(task: Task) -> Self {
        Self {
            confirmed_status: task.status(),
            task,
            sync: SyncState::Confirmed,
            generation: 0,
            confirmed_generation: 0,
        }
    }

    const fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    const fn record_confirmed(&mut self, status: TaskStatus, generation: u64) {
        if generation > self.confirmed_generation {
            self.confirmed_status = status;
            self.confirmed_generation = generation;
        }
    }
}

impl BoardStore {
    fn entry(&self, id: &TaskId) -> Option<&StoreEntry> {
        self.entries.iter().find(|entry| entry.task.id() == id)
    }

    fn entry_mut(&mut self, id: &TaskId) -> Option<&mut StoreEntry> {
        self.entries.iter_mut().find(|entry| entry.task.id() == id)
    }
}

/// Task board orchestration service.
///
/// The service is the only writer to the local store. Layout and filtering
/// read from [`TaskBoardService::snapshot`].
pub struct TaskBoardService<R, D, C>
where
    R: TaskRepository,
    D: EmployeeDirectory,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    directory: Arc<D>,
    clock: Arc<C>,
    failure_policy: SyncFailurePolicy,
    store: Arc<RwLock<BoardStore>>,
}

impl<R, D, C> Clone for TaskBoardService<R, D, C>
where
    R: TaskRepository,
    D: EmployeeDirectory,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            directory: Arc::clone(&self.directory),
            clock: Arc::clone(&self.clock),
            failure_policy: self.failure_policy,
            store: Arc::clone(&self.store),
        }
    }
}

impl<R, D, C> TaskBoardService<R, D, C>
where
    R: TaskRepository,
    D: EmployeeDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a board service with an empty local store.
    #[must_use]
    pub fn new(repository: Arc<R>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            repository,
            directory,
            clock,
            failure_policy: SyncFailurePolicy::default(),
            store: Arc::new(RwLock::new(BoardStore::default())),
        }
    }

    /// Sets the policy applied when a remote status update fails.
    #[must_use]
    pub const fn with_failure_policy(mut self, policy: SyncFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Returns the clock used for timestamps and overdue checks.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn read_store(&self) -> TaskBoardResult<RwLockReadGuard<'_, BoardStore>> {
        self.store.read().map_err(|_| TaskBoardError::StoreUnavailable)
    }

    fn write_store(&self) -> TaskBoardResult<RwLockWriteGuard<'_, BoardStore>> {
        self.store.write().map_err(|_| TaskBoardError::StoreUnavailable)
    }

    /// Replaces the local store with the remote task collection.
    ///
    /// Employees are refreshed as well; when the directory fails the
    /// previous employee list is kept and assignees degrade to
    /// "Unassigned".
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError`] when the task collection cannot be fetched.
    pub async fn refresh(&self) -> TaskBoardResult<()> {
        let tasks = self.repository.list().await?;
        let employees = match self.directory.list_employees().await {
            Ok(employees) => Some(employees),
            Err(err) => {
                warn!(error = %err, "employee directory unavailable, keeping previous list");
                None
            }
        };

        let mut store = self.write_store()?;
        store.entries = tasks.into_iter().map(StoreEntry::confirmed).collect();
        if let Some(list) = employees {
            store.employees = list;
        }
        info!(tasks = store.entries.len(), "task board refreshed");
        Ok(())
    }

    /// Returns the current local tasks in store order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StoreUnavailable`] when the store lock is
    /// poisoned.
    pub fn list_tasks(&self) -> TaskBoardResult<Vec<Task>> {
        let store = self.read_store()?;
        Ok(store.entries.iter().map(|entry| entry.task.clone()).collect())
    }

    /// Returns the employees available for assignment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StoreUnavailable`] when the store lock is
    /// poisoned.
    pub fn employees(&self) -> TaskBoardResult<Vec<Employee>> {
        Ok(self.read_store()?.employees.clone())
    }

    /// Returns a single task from the local store.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id is unknown.
    pub fn task(&self, id: &TaskId) -> TaskBoardResult<Task> {
        self.read_store()?
            .entry(id)
            .map(|entry| entry.task.clone())
            .ok_or_else(|| TaskBoardError::NotFound(id.clone()))
    }

    /// Returns the sync state of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] when the id is unknown.
    pub fn sync_state(&self, id: &TaskId) -> TaskBoardResult<SyncState> {
        self.read_store()?
            .entry(id)
            .map(|entry| entry.sync.clone())
            .ok_or_else(|| TaskBoardError::NotFound(id.clone()))
    }

    /// Returns a consistent copy of tasks, sync states and employees.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::StoreUnavailable`] when the store lock is
    /// poisoned.
    pub fn snapshot(&self) -> TaskBoardResult<BoardSnapshot> {
        let store = self.read_store()?;
        let sync_states = store
            .entries
            .iter()
            .filter(|entry| entry.sync != SyncState::Confirmed)
            .map(|entry| (entry.task.id().clone(), entry.sync.clone()))
            .collect();
        Ok(BoardSnapshot {
            tasks: store.entries.iter().map(|entry| entry.task.clone()).collect(),
            sync_states,
            employees: store.employees.clone(),
        })
    }

    /// Creates a task and appends it to the store in `pending` status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Validation`] when the title is blank or no
    /// assignee is given; nothing is added in that case. Remote failures are
    /// returned as-is.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskBoardResult<Task> {
        let input = request.into_new_task()?;
        let created = self.repository.create(&input).await?;

        let mut store = self.write_store()?;
        store.entries.push(StoreEntry::confirmed(created.clone()));
        info!(task_id = %created.id(), "task created");
        Ok(created)
    }

    /// Sets the status of a task.
    ///
    /// The change is visible to readers before the remote call resolves.
    /// Setting the current status again is a no-op without a remote call.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] for unknown ids, or the remote
    /// failure. After a remote failure the local value follows the
    /// configured [`SyncFailurePolicy`].
    pub async fn set_status(&self, id: &TaskId, status: TaskStatus) -> TaskBoardResult<Task> {
        let (optimistic, generation) = {
            let mut store = self.write_store()?;
            let entry = store
                .entry_mut(id)
                .ok_or_else(|| TaskBoardError::NotFound(id.clone()))?;
            if entry.task.status() == status {
                debug!(task_id = %id, %status, "status unchanged");
                return Ok(entry.task.clone());
            }
            entry.task.apply_status(status, &*self.clock);
            entry.sync = SyncState::Pending;
            entry.generation += 1;
            (entry.task.clone(), entry.generation)
        };

        match self.repository.update_status(id, status).await {
            Ok(echoed) => {
                self.confirm(id, generation, status, echoed)?;
                info!(task_id = %id, %status, "status updated");
                Ok(self.task(id).unwrap_or(optimistic))
            }
            Err(err) => {
                let failure = TaskBoardError::from(err);
                warn!(task_id = %id, %status, error = %failure, "remote status update failed");
                self.reconcile_failure(id, generation, &failure)?;
                Err(failure)
            }
        }
    }

    fn confirm(
        &self,
        id: &TaskId,
        generation: u64,
        status: TaskStatus,
        echoed: Option<Task>,
    ) -> TaskBoardResult<()> {
        let mut store = self.write_store()?;
        let Some(entry) = store.entry_mut(id) else {
            return Ok(());
        };
        if !entry.is_current(generation) {
            // A newer local change is in flight; its own answer settles it.
            debug!(task_id = %id, %status, generation, "stale confirmation");
            entry.record_confirmed(status, generation);
            return Ok(());
        }
        if let Some(remote) = echoed {
            entry.task = remote;
        }
        let settled = entry.task.status();
        entry.record_confirmed(settled, generation);
        entry.sync = SyncState::Confirmed;
        Ok(())
    }

    fn reconcile_failure(
        &self,
        id: &TaskId,
        generation: u64,
        failure: &TaskBoardError,
    ) -> TaskBoardResult<()> {
        let mut store = self.write_store()?;
        let Some(entry) = store.entry_mut(id) else {
            return Ok(());
        };
        if !entry.is_current(generation) {
            debug!(task_id = %id, generation, "stale failure ignored");
            return Ok(());
        }
        match self.failure_policy {
            SyncFailurePolicy::Keep => {
                entry.sync = SyncState::Failed {
                    message: failure.user_message(),
                };
            }
            SyncFailurePolicy::Revert => {
                entry.task.apply_status(entry.confirmed_status, &*self.clock);
                entry.sync = SyncState::Confirmed;
            }
        }
        Ok(())
    }

    /// Moves a task one step along `pending -> in-progress -> completed`.
    ///
    /// Unavailable moves (back from `pending`, forward from `completed`,
    /// any step from `waiting-for-approval`) return the task unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] for unknown ids, or the remote
    /// failure of the resulting status update.
    pub async fn move_task(&self, id: &TaskId, direction: MoveDirection) -> TaskBoardResult<Task> {
        let current = self.task(id)?;
        let Some(target) = current.status().step(direction) else {
            debug!(task_id = %id, status = %current.status(), ?direction, "move unavailable");
            return Ok(current);
        };
        self.set_status(id, target).await
    }

    /// Applies an approval decision to a task waiting for approval.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAwaitingApproval`] (as
    /// [`TaskBoardError::Validation`]) for tasks in any other status,
    /// [`TaskBoardError::NotFound`] for unknown ids, or the remote failure.
    pub async fn decide(&self, id: &TaskId, decision: ApprovalDecision) -> TaskBoardResult<Task> {
        let current = self.task(id)?;
        let target = decision.resolve(&current)?;
        self.set_status(id, target).await
    }

    /// Approves a task: `waiting-for-approval -> completed`.
    ///
    /// # Errors
    ///
    /// See [`TaskBoardService::decide`].
    pub async fn approve(&self, id: &TaskId) -> TaskBoardResult<Task> {
        self.decide(id, ApprovalDecision::Approve).await
    }

    /// Rejects a task: `waiting-for-approval -> in-progress`.
    ///
    /// # Errors
    ///
    /// See [`TaskBoardService::decide`].
    pub async fn reject(&self, id: &TaskId) -> TaskBoardResult<Task> {
        self.decide(id, ApprovalDecision::Reject).await
    }

    /// Handles a drop of a decoded move-intent onto `lane`.
    ///
    /// Returns `None` when the intent's source lane is `lane`. Any other
    /// lane is accepted, including multi-step jumps such as
    /// `pending -> completed`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] for unknown ids, or the remote
    /// failure of the status update.
    pub async fn drop_intent(
        &self,
        intent: &MoveIntent,
        lane: TaskStatus,
    ) -> TaskBoardResult<Option<Task>> {
        if !intent.changes_lane(lane) {
            debug!(task_id = %intent.task_id(), %lane, "dropped on source lane");
            return Ok(None);
        }
        self.set_status(intent.task_id(), lane).await.map(Some)
    }

    /// Handles a drop of a raw drag payload onto `lane`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedMoveIntent`] (as
    /// [`TaskBoardError::Validation`]) when the payload cannot be decoded,
    /// otherwise see [`TaskBoardService::drop_intent`].
    pub async fn drop_on_lane(
        &self,
        payload: &str,
        lane: TaskStatus,
    ) -> TaskBoardResult<Option<Task>> {
        let intent = MoveIntent::from_payload(payload)?;
        self.drop_intent(&intent, lane).await
    }

    /// Starts the deletion of a task and returns the confirmation token.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::NotFound`] for unknown ids.
    pub fn request_delete(&self, id: &TaskId) -> TaskBoardResult<PendingDeletion> {
        let task = self.task(id)?;
        debug!(task_id = %id, "deletion awaiting confirmation");
        Ok(PendingDeletion {
            task_id: task.id().clone(),
            title: task.title().to_owned(),
        })
    }

    /// Abandons a requested deletion. The task stays in the store.
    pub fn cancel_delete(&self, pending: PendingDeletion) {
        let PendingDeletion { task_id, title } = pending;
        debug!(task_id = %task_id, %title, "deletion cancelled");
    }

    /// Deletes a task after confirmation, remotely first, then locally.
    ///
    /// A task the remote side no longer knows is still removed locally.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::Permission`] when the remote side refuses
    /// the deletion, leaving the store unchanged, or other remote failures.
    pub async fn confirm_delete(&self, pending: PendingDeletion) -> TaskBoardResult<()> {
        let id = pending.task_id;
        match self.repository.delete(&id).await {
            Ok(()) => {}
            Err(TaskRepositoryError::NotFound(_)) => {
                debug!(task_id = %id, "task already gone remotely");
            }
            Err(err) => {
                let failure = TaskBoardError::from(err);
                warn!(task_id = %id, error = %failure, "remote delete failed");
                return Err(failure);
            }
        }

        let mut store = self.write_store()?;
        store.entries.retain(|entry| entry.task.id() != &id);
        info!(task_id = %id, "task deleted");
        Ok(())
    }
}
