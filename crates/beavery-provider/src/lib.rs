//! Clients for the hosted backend-as-a-service.
//!
//! [`auth::AuthClient`] talks to the hosted auth API (one-time codes, users,
//! sign-out, metadata). [`rest::RestClient`] talks to the REST query layer in
//! front of the Postgres database. Both are plain `reqwest` wrappers; there is
//! no retry or timeout logic.

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

pub use error::ProviderError;
pub use types::{ProviderUser, Session};
