//! Assignee and free-text filtering over the task store.

use crate::task::domain::{EmployeeId, Task};

/// View projection selecting the visible subset of tasks.
///
/// An empty filter matches every task. Both criteria compose with logical
/// AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    assignee: Option<EmployeeId>,
    search: String,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the view to tasks assigned to `assignee`.
    #[must_use]
    pub fn with_assignee(mut self, assignee: EmployeeId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Restricts the view to tasks whose title or description contains
    /// `search`, ignoring case. Whitespace is part of the query; empty text
    /// matches everything.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().to_lowercase();
        self
    }

    /// Returns the assignee criterion, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&EmployeeId> {
        self.assignee.as_ref()
    }

    /// Returns the normalised search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Returns `true` when the task passes both criteria.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_assignee(task) && self.matches_search(task)
    }

    /// Returns the visible tasks in store order without copying them.
    #[must_use]
    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    fn matches_assignee(&self, task: &Task) -> bool {
        self.assignee
            .as_ref()
            .is_none_or(|wanted| task.assigned_to() == Some(wanted))
    }

    fn matches_search(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let contains = |text: &str| text.to_lowercase().contains(&self.search);
        contains(task.title()) || task.description().is_some_and(contains)
    }
}
