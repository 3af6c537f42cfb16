//! Test utilities for CeluCol services.
//!
//! Import from dev-dependencies only.

pub mod auth;
