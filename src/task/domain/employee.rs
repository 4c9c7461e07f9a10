//! Read-only employee records used to resolve task assignees.

use super::EmployeeId;
use serde::{Deserialize, Serialize};

/// Employee as exposed by the external employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    name: String,
}

impl Employee {
    /// Creates an employee record.
    #[must_use]
    pub fn new(id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn id(&self) -> &EmployeeId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the uppercase first letter of the name, or `?` when the name
    /// is blank.
    #[must_use]
    pub fn initial(&self) -> char {
        self.name
            .trim()
            .chars()
            .next()
            .and_then(|first| first.to_uppercase().next())
            .unwrap_or('?')
    }
}
