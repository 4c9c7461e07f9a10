//! HTTP adapters talking to the dashboard REST API.

mod client;
mod models;
mod repository;

pub use client::{ApiClient, ApiClientError, ServerFailure};
pub use repository::{HttpEmployeeDirectory, HttpTaskRepository};
