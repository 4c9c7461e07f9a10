//! Task status values and the button-driven step sequence.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status, one per board lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been submitted and awaits an approval decision.
    WaitingForApproval,
    /// Task has been completed.
    Completed,
}

/// Direction of a single-step move along the button sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Towards `completed`.
    Forward,
    /// Towards `pending`.
    Back,
}

impl TaskStatus {
    /// Lanes in the order the board renders them.
    pub const BOARD_ORDER: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::WaitingForApproval,
    ];

    /// Statuses reachable with the forward and back buttons, in order.
    const STEP_SEQUENCE: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::WaitingForApproval => "waiting-for-approval",
            Self::Completed => "completed",
        }
    }

    /// Returns the lane header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "To Do",
            Self::InProgress => "In Progress",
            Self::WaitingForApproval => "In Review",
            Self::Completed => "Done",
        }
    }

    /// Returns `true` while the task waits for an approval decision.
    #[must_use]
    pub const fn awaits_approval(self) -> bool {
        matches!(self, Self::WaitingForApproval)
    }

    /// Returns the status one step away in `direction`.
    ///
    /// Returns `None` when the move is unavailable: back from `pending`,
    /// forward from `completed`, or any step from `waiting-for-approval`,
    /// which only accepts approval decisions.
    #[must_use]
    pub fn step(self, direction: MoveDirection) -> Option<Self> {
        let position = Self::STEP_SEQUENCE
            .iter()
            .position(|status| *status == self)?;
        let target = match direction {
            MoveDirection::Forward => position.checked_add(1)?,
            MoveDirection::Back => position.checked_sub(1)?,
        };
        Self::STEP_SEQUENCE.get(target).copied()
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" => Ok(Self::InProgress),
            "waiting-for-approval" => Ok(Self::WaitingForApproval),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
