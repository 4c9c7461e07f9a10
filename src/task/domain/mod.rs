//! Domain model for the task board.
//!
//! The task domain models task creation, the status step sequence, the
//! approval gate and the drag move-intent while keeping transport and
//! storage concerns outside of the domain boundary.

mod approval;
mod employee;
mod error;
mod ids;
mod move_intent;
mod priority;
mod status;
mod task;

pub use approval::ApprovalDecision;
pub use employee::Employee;
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{EmployeeId, TaskId};
pub use move_intent::MoveIntent;
pub use priority::TaskPriority;
pub use status::{MoveDirection, TaskStatus};
pub use task::{NewTask, PersistedTaskData, Task};
