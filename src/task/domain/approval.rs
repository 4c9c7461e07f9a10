//! Approval gate for tasks waiting for review.

use super::{Task, TaskDomainError, TaskStatus};

/// Outcome chosen at the approval gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalDecision {
    /// Accept the submitted work.
    Approve,
    /// Send the task back for more work.
    Reject,
}

impl ApprovalDecision {
    /// Returns the status the decision leads to.
    #[must_use]
    pub const fn target_status(self) -> TaskStatus {
        match self {
            Self::Approve => TaskStatus::Completed,
            Self::Reject => TaskStatus::InProgress,
        }
    }

    /// Resolves the decision against a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NotAwaitingApproval`] unless the task is
    /// `waiting-for-approval`.
    pub fn resolve(self, task: &Task) -> Result<TaskStatus, TaskDomainError> {
        if !task.status().awaits_approval() {
            return Err(TaskDomainError::NotAwaitingApproval {
                task_id: task.id().clone(),
                status: task.status(),
            });
        }
        Ok(self.target_status())
    }
}
