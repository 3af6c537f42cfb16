//! Shared HTTP plumbing for CeluCol services: error envelope, health probes,
//! request-id and CORS layers, tracing bootstrap and serde helpers.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
