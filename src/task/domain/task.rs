//! Task aggregate root and creation input.

use super::{EmployeeId, TaskDomainError, TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    assigned_to: EmployeeId,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    tags: BTreeSet<String>,
}

impl NewTask {
    /// Creates task input with the required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the title is blank and
    /// [`TaskDomainError::MissingAssignee`] when no assignee is given.
    pub fn new(
        title: impl Into<String>,
        assigned_to: Option<EmployeeId>,
    ) -> Result<Self, TaskDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let assignee = assigned_to.ok_or(TaskDomainError::MissingAssignee)?;

        Ok(Self {
            title: trimmed.to_owned(),
            description: None,
            assigned_to: assignee,
            priority: TaskPriority::default(),
            due_date: None,
            tags: BTreeSet::new(),
        })
    }

    /// Sets the description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let text = description.into();
        self.description = (!text.trim().is_empty()).then_some(text);
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

    /// Sets the tags. Blank labels are skipped.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = normalize_tags(tags);
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> &EmployeeId {
        &self.assigned_to
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    assigned_to: Option<EmployeeId>,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    tags: BTreeSet<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored or fetched task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Stored task identifier.
    pub id: TaskId,
    /// Stored title.
    pub title: String,
    /// Stored description.
    pub description: Option<String>,
    /// Stored assignee reference.
    pub assigned_to: Option<EmployeeId>,
    /// Stored status.
    pub status: TaskStatus,
    /// Stored priority.
    pub priority: TaskPriority,
    /// Stored due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Stored tags.
    pub tags: BTreeSet<String>,
    /// Stored creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Stored latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `pending` task from validated input.
    #[must_use]
    pub fn create(id: TaskId, input: &NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            assigned_to: Some(input.assigned_to.clone()),
            status: TaskStatus::Pending,
            priority: input.priority,
            due_date: input.due_date,
            tags: input.tags.clone(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from stored or fetched data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            assigned_to: data.assigned_to,
            status: data.status,
            priority: data.priority,
            due_date: data.due_date,
            tags: data.tags,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assigned_to(&self) -> Option<&EmployeeId> {
        self.assigned_to.as_ref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` when the due date has passed and the task is not
    /// completed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Sets the status and refreshes `updated_at`.
    ///
    /// Any status may follow any other here; callers decide which moves are
    /// offered.
    pub fn apply_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc();
    }
}

fn normalize_tags(tags: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}
