//! Domain types shared by the API service and the onboarding client.
//!
//! Pure types only; no HTTP or database dependencies.

pub mod id;
pub mod user;

pub use id::UserId;
pub use user::{DisplayName, MAX_NAME_CHARS, NameError, UserProfile};
