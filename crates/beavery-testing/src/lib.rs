//! Test utilities for Beavery crates.
//!
//! Bearer headers, signed access tokens and ready-made test users.
//! Use from `[dev-dependencies]` only.

pub mod auth;
pub mod fixture;
pub mod token;
