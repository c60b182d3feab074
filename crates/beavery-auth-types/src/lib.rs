//! Auth types for handling identity-provider access tokens.
//!
//! Provides bearer-token extraction and local JWT validation.

pub mod bearer;
pub mod token;
