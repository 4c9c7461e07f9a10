//! Employee directory port used to resolve assignees.

use super::TaskRepositoryResult;
use crate::task::domain::Employee;
use async_trait::async_trait;

/// Read-only access to the external employee collection.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Returns every known employee.
    ///
    /// # Errors
    ///
    /// Returns transport, authorisation or persistence failures.
    async fn list_employees(&self) -> TaskRepositoryResult<Vec<Employee>>;
}
