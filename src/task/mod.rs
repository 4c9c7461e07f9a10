//! Kanban task board.
//!
//! Tasks move through `pending`, `in-progress`, `waiting-for-approval` and
//! `completed` lanes. Status changes are applied optimistically to a local
//! store and then synchronised with a remote task collection. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
