//! Move-intent payload carried across a drag-and-drop gesture.

use super::{TaskDomainError, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// Which task is being relocated and which lane it left.
///
/// The payload travels as JSON text, for example
/// `{"taskId":"t1","sourceStatus":"pending"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveIntent {
    task_id: TaskId,
    source_status: TaskStatus,
}

impl MoveIntent {
    /// Captures a move-intent at drag start.
    #[must_use]
    pub const fn new(task_id: TaskId, source_status: TaskStatus) -> Self {
        Self {
            task_id,
            source_status,
        }
    }

    /// Returns the dragged task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the lane the drag started from.
    #[must_use]
    pub const fn source_status(&self) -> TaskStatus {
        self.source_status
    }

    /// Returns `true` when dropping on `lane` would change the status.
    #[must_use]
    pub fn changes_lane(&self, lane: TaskStatus) -> bool {
        self.source_status != lane
    }

    /// Encodes the intent into the drag payload text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedMoveIntent`] if serialisation
    /// fails.
    pub fn to_payload(&self) -> Result<String, TaskDomainError> {
        serde_json::to_string(self)
            .map_err(|err| TaskDomainError::MalformedMoveIntent(err.to_string()))
    }

    /// Decodes an intent from drag payload text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::MalformedMoveIntent`] when the payload is
    /// not a valid move-intent, including blank task identifiers and
    /// unknown statuses.
    pub fn from_payload(payload: &str) -> Result<Self, TaskDomainError> {
        let intent: Self = serde_json::from_str(payload)
            .map_err(|err| TaskDomainError::MalformedMoveIntent(err.to_string()))?;
        if intent.task_id.as_str().trim().is_empty() {
            return Err(TaskDomainError::MalformedMoveIntent(
                "task identifier is empty".to_owned(),
            ));
        }
        Ok(intent)
    }
}
