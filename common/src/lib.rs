//! Shared building blocks for the experiment telemetry dashboard.
//!
//! Contains configuration, error types, the API response envelope,
//! middleware, data models and small utilities used by the service crate.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod utils;
