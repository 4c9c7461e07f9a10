//! Adapter implementations for the task board ports.
//!
//! [`memory`] backs an offline board; [`http`] talks to the REST API. Both
//! sit behind the same ports, so the board service does not know which one
//! it is using.

pub mod http;
pub mod memory;
