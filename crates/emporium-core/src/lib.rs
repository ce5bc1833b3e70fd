//! Ambient service plumbing: health endpoints, request IDs, config loading,
//! tracing setup, and wire-format serde helpers.

pub mod config;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
