//! Repository port for the remote task collection.

use crate::task::domain::{NewTask, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task collection contract.
///
/// Implementations own identifier assignment and timestamps. The board
/// service keeps its own local copy and treats the repository as the
/// remote side of an optimistic update.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task in the collection.
    ///
    /// # Errors
    ///
    /// Returns transport, authorisation or persistence failures.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Creates a task in `pending` status and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns transport, authorisation or persistence failures.
    async fn create(&self, input: &NewTask) -> TaskRepositoryResult<Task>;

    /// Updates the status of a task.
    ///
    /// Returns the updated record when the backend echoes one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist, or transport, authorisation and persistence failures.
    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::PermissionDenied`] when the caller may
    /// not delete tasks, [`TaskRepositoryError::NotFound`] when the task does
    /// not exist, or transport and persistence failures.
    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository and employee directory
/// implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backend refused the operation for the current session.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The session has no valid credentials.
    #[error("authentication required")]
    Unauthenticated,

    /// The backend rejected the request for another reason.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The backend answered with a payload that is not a valid record.
    #[error("invalid response payload: {0}")]
    InvalidResponse(String),

    /// The backend could not be reached or failed internally.
    #[error("network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a transport error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
