//! Unit tests for the task board domain and services.

mod service_tests;
mod support;
