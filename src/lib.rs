//! Taskboard: a Kanban board for employee task tracking.
//!
//! This crate provides the task store, status transition rules, board
//! layout, drag-and-drop transfer and approval flow behind a dashboard task
//! board, together with in-memory and REST backends.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, HTTP)
//!
//! # Modules
//!
//! - [`task`]: Task store, layout, filtering and approval
//! - [`session`]: Session identity for remote requests
//! - [`config`]: Environment-driven configuration

pub mod config;
pub mod session;
pub mod task;
