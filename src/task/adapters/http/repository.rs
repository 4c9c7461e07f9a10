//! REST-backed task repository and employee directory.

use super::client::{ApiClient, read_body};
use super::models::{
    CreateTaskBody, EmployeeListPayload, EmployeeRecord, StatusPatchBody, TaskListPayload,
    TaskPayload, TaskRecord, raw_record_id,
};
use crate::task::{
    domain::{Employee, NewTask, Task, TaskId, TaskStatus},
    ports::{EmployeeDirectory, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

const TASKS: &str = "tasks";
const EMPLOYEES: &str = "employees";

/// Task repository backed by `GET/POST/PUT/DELETE /tasks`.
///
/// The clock stamps records that arrive without `createdAt`.
pub struct HttpTaskRepository<C = DefaultClock> {
    client: ApiClient,
    clock: Arc<C>,
}

impl HttpTaskRepository<DefaultClock> {
    /// Creates a repository using `client` and the system clock.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self::with_clock(client, Arc::new(DefaultClock))
    }
}

impl<C> HttpTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a repository using `client` and the given clock.
    #[must_use]
    pub const fn with_clock(client: ApiClient, clock: Arc<C>) -> Self {
        Self { client, clock }
    }
}

impl<C> Clone for HttpTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

/// Employee directory backed by `GET /employees`.
#[derive(Debug, Clone)]
pub struct HttpEmployeeDirectory {
    client: ApiClient,
}

impl HttpEmployeeDirectory {
    /// Creates a directory using `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> TaskRepositoryResult<T> {
    serde_json::from_str(body)
        .map_err(|err| TaskRepositoryError::InvalidResponse(err.to_string()))
}

/// Converts one raw list entry, or explains why it cannot be shown.
fn list_entry(raw: serde_json::Value, received_at: DateTime<Utc>) -> TaskRepositoryResult<Task> {
    serde_json::from_value::<TaskRecord>(raw)
        .map_err(|err| TaskRepositoryError::InvalidResponse(err.to_string()))?
        .into_domain(received_at)
}

#[async_trait]
impl<C> TaskRepository for HttpTaskRepository<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let response = self.client.send(Method::GET, &[TASKS], None).await?;
        let body = read_body(response).await?;
        let received_at = self.clock.utc();
        let mut tasks = Vec::new();
        for raw in decode::<TaskListPayload>(&body)?.into_records() {
            let record_id = raw_record_id(&raw);
            match list_entry(raw, received_at) {
                Ok(task) => tasks.push(task),
                Err(err) => warn!(
                    task_id = record_id.as_deref().unwrap_or("?"),
                    error = %err,
                    "skipping invalid task record"
                ),
            }
        }
        Ok(tasks)
    }

    async fn create(&self, input: &NewTask) -> TaskRepositoryResult<Task> {
        let body = CreateTaskBody::from(input);
        let response = self
            .client
            .send_json(Method::POST, &[TASKS], &body, None)
            .await?;
        let text = read_body(response).await?;
        decode::<TaskPayload>(&text)?
            .into_record()
            .into_domain(self.clock.utc())
    }

    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> TaskRepositoryResult<Option<Task>> {
        let body = StatusPatchBody { status };
        let response = self
            .client
            .send_json(Method::PUT, &[TASKS, id.as_str()], &body, Some(id))
            .await?;
        let text = read_body(response).await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        // Some deployments answer with a bare acknowledgement instead of the
        // record; the update still succeeded.
        match decode::<TaskPayload>(&text) {
            Ok(payload) => payload.into_record().into_domain(self.clock.utc()).map(Some),
            Err(err) => {
                debug!(task_id = %id, error = %err, "update response carried no task record");
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: &TaskId) -> TaskRepositoryResult<()> {
        self.client
            .send(Method::DELETE, &[TASKS, id.as_str()], Some(id))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EmployeeDirectory for HttpEmployeeDirectory {
    async fn list_employees(&self) -> TaskRepositoryResult<Vec<Employee>> {
        let response = self.client.send(Method::GET, &[EMPLOYEES], None).await?;
        let body = read_body(response).await?;
        decode::<EmployeeListPayload>(&body)?
            .into_records()
            .into_iter()
            .map(EmployeeRecord::into_domain)
            .collect()
    }
}
