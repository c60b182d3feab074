//! Client-side onboarding flow.
//!
//! [`machine`] holds the pure step machine, [`controller`] drives it against
//! the identity provider, the data service and the backend API through the
//! traits in [`ports`]. [`dashboard`] is the guarded home view that follows.

pub mod backend;
pub mod controller;
pub mod dashboard;
pub mod hosted;
pub mod marker;
pub mod machine;
pub mod otp;
pub mod ports;

pub use controller::OnboardingController;
pub use dashboard::{Dashboard, DashboardView, Redirect};
pub use machine::{Event, State, Step};
pub use otp::OtpInput;
