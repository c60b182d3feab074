//! Shared HTTP plumbing for Beavery binaries.
//!
//! Tracing setup, tower layers, the JSON 404 fallback, health handlers and
//! environment config helpers. Nothing here knows about users or onboarding.

pub mod config;
pub mod fallback;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
