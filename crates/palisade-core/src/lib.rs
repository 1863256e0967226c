//! Shared HTTP plumbing for palisade services.
//!
//! Health handlers, tracing setup, request-id middleware, and serde helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
