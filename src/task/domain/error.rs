//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or transitioning domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// No employee was selected for the task.
    #[error("task must be assigned to an employee")]
    MissingAssignee,

    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The employee identifier is empty after trimming.
    #[error("employee identifier must not be empty")]
    EmptyEmployeeId,

    /// An approval decision was requested for a task that is not awaiting
    /// approval.
    #[error("task {task_id} is {status}, only tasks waiting for approval can be approved or rejected")]
    NotAwaitingApproval {
        /// Task that received the decision.
        task_id: TaskId,
        /// Status the task was in.
        status: TaskStatus,
    },

    /// A drag payload could not be decoded into a move-intent.
    #[error("malformed move-intent payload: {0}")]
    MalformedMoveIntent(String),
}

/// Error returned while parsing task statuses from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
