//! In-memory employee directory.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::Employee,
    ports::{EmployeeDirectory, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory employee directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeDirectory {
    employees: Arc<RwLock<Vec<Employee>>>,
}

impl InMemoryEmployeeDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding the given employees.
    #[must_use]
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        Self {
            employees: Arc::new(RwLock::new(employees.into_iter().collect())),
        }
    }

    /// Adds an employee.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn add(&self, employee: Employee) -> TaskRepositoryResult<()> {
        let mut employees = self.employees.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        employees.push(employee);
        Ok(())
    }
}

#[async_trait]
impl EmployeeDirectory for InMemoryEmployeeDirectory {
    async fn list_employees(&self) -> TaskRepositoryResult<Vec<Employee>> {
        let employees = self.employees.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(employees.clone())
    }
}
