//! Wire records for the task board REST API.
//!
//! The API is tolerant in what it returns: identifiers may arrive as `_id`
//! or `id`, collections and single records may be wrapped in an envelope,
//! and `assignedTo` may be populated with the employee record. These types
//! absorb that variety and hand clean domain values to the repository.

use crate::task::domain::{
    Employee, EmployeeId, NewTask, PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus,
};
use crate::task::ports::{TaskRepositoryError, TaskRepositoryResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Employee as returned by `GET /employees` or populated inside a task.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct EmployeeRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl EmployeeRecord {
    fn identifier(&self) -> Option<&str> {
        self.mongo_id.as_deref().or(self.id.as_deref())
    }

    pub(super) fn into_domain(self) -> TaskRepositoryResult<Employee> {
        let id = self
            .identifier()
            .ok_or_else(|| invalid("employee record has no identifier"))
            .and_then(|raw| EmployeeId::new(raw).map_err(|err| invalid(err.to_string())))?;
        Ok(Employee::new(id, self.name.unwrap_or_default()))
    }
}

/// `assignedTo` as either a bare id or a populated employee.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AssigneeRef {
    Id(String),
    Populated(EmployeeRecord),
}

impl AssigneeRef {
    fn into_employee_id(self) -> Option<EmployeeId> {
        let raw = match self {
            Self::Id(value) => value,
            Self::Populated(record) => record.identifier()?.to_owned(),
        };
        EmployeeId::new(raw).ok()
    }
}

/// Task as returned by the task endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TaskRecord {
    #[serde(rename = "_id", default)]
    mongo_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    assigned_to: Option<AssigneeRef>,
    status: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl TaskRecord {
    /// Converts the record into a domain task.
    ///
    /// `received_at` stands in for missing timestamps.
    pub(super) fn into_domain(self, received_at: DateTime<Utc>) -> TaskRepositoryResult<Task> {
        let raw_id = self
            .mongo_id
            .or(self.id)
            .ok_or_else(|| invalid("task record has no identifier"))?;
        let id = TaskId::new(raw_id).map_err(|err| invalid(err.to_string()))?;
        let status =
            TaskStatus::try_from(self.status.as_str()).map_err(|err| invalid(err.to_string()))?;
        let priority = self
            .priority
            .as_deref()
            .and_then(|value| TaskPriority::try_from(value).ok())
            .unwrap_or_default();
        let due_date = self.due_date.as_deref().map(parse_timestamp).transpose()?;
        let created_at = self
            .created_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?
            .unwrap_or(received_at);
        let updated_at = self
            .updated_at
            .as_deref()
            .map(parse_timestamp)
            .transpose()?
            .unwrap_or(created_at);

        Ok(Task::from_persisted(PersistedTaskData {
            id,
            title: self.title,
            description: self.description.filter(|text| !text.trim().is_empty()),
            assigned_to: self.assigned_to.and_then(AssigneeRef::into_employee_id),
            status,
            priority,
            due_date,
            tags: self
                .tags
                .unwrap_or_default()
                .into_iter()
                .filter(|tag| !tag.trim().is_empty())
                .collect(),
            created_at,
            updated_at,
        }))
    }
}

/// Task list payload in any of the accepted shapes.
///
/// Entries stay raw so one malformed record cannot hide the others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum TaskListPayload {
    Tasks { tasks: Vec<Value> },
    Data { data: Vec<Value> },
    Bare(Vec<Value>),
}

impl TaskListPayload {
    pub(super) fn into_records(self) -> Vec<Value> {
        match self {
            Self::Tasks { tasks } => tasks,
            Self::Data { data } => data,
            Self::Bare(records) => records,
        }
    }
}

/// Single task payload in any of the accepted shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum TaskPayload {
    Task { task: TaskRecord },
    Data { data: TaskRecord },
    Bare(TaskRecord),
}

impl TaskPayload {
    pub(super) fn into_record(self) -> TaskRecord {
        match self {
            Self::Task { task } => task,
            Self::Data { data } => data,
            Self::Bare(record) => record,
        }
    }
}

/// Employee list payload in any of the accepted shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum EmployeeListPayload {
    Employees { employees: Vec<EmployeeRecord> },
    Data { data: Vec<EmployeeRecord> },
    Bare(Vec<EmployeeRecord>),
}

impl EmployeeListPayload {
    pub(super) fn into_records(self) -> Vec<EmployeeRecord> {
        match self {
            Self::Employees { employees } => employees,
            Self::Data { data } => data,
            Self::Bare(records) => records,
        }
    }
}

/// Body of `POST /tasks`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateTaskBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    assigned_to: &'a str,
    priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<&'a str>,
}

impl<'a> From<&'a NewTask> for CreateTaskBody<'a> {
    fn from(input: &'a NewTask) -> Self {
        Self {
            title: input.title(),
            description: input.description(),
            assigned_to: input.assigned_to().as_str(),
            priority: input.priority(),
            due_date: input.due_date().map(|due| due.to_rfc3339()),
            tags: input.tags().iter().map(String::as_str).collect(),
        }
    }
}

/// Body of `PUT /tasks/{id}` for a status change.
#[derive(Debug, Serialize)]
pub(super) struct StatusPatchBody {
    pub(super) status: TaskStatus,
}

/// Returns the identifier of a raw task entry, if it has one.
pub(super) fn raw_record_id(raw: &Value) -> Option<String> {
    raw.get("_id")
        .or_else(|| raw.get("id"))
        .and_then(Value::as_str)
        .map(str::to_owned)
}

/// Parses RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(raw: &str) -> TaskRepositoryResult<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| invalid(format!("unparseable timestamp '{raw}'")))
}

fn invalid(message: impl Into<String>) -> TaskRepositoryError {
    TaskRepositoryError::InvalidResponse(message.into())
}
