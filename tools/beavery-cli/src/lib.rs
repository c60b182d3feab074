//! Terminal front end for the onboarding flow and the dashboard.

pub mod command;
pub mod render;
pub mod session;
