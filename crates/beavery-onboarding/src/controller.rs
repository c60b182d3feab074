//! Drives the step machine against the identity provider, the data service
//! and the backend API.

use beavery_domain::{DisplayName, NameError};
use beavery_provider::ProviderError;

use crate::machine::{Event, State, Step, transition};
use crate::marker::{self, SessionStore};
use crate::ports::{IdentityClient, ProfileLookup, SignedInUser, UserApi};

pub const WRONG_CODE_MESSAGE: &str = "Wrong code, try again";
pub const EMPTY_EMAIL_MESSAGE: &str = "Please enter your email";
pub const EMPTY_NAME_MESSAGE: &str = "Please enter your name";
pub const LONG_NAME_MESSAGE: &str = "Name must be 255 characters or less";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please sign in again.";

/// Provider error codes that mean the code itself was wrong or stale.
const WRONG_CODE_CODES: [&str; 4] = ["otp_expired", "invalid_otp", "otp_invalid", "token_expired"];

/// Messages the provider sends for a bad code when it omits the error code.
const WRONG_CODE_PHRASES: [&str; 3] = [
    "token has expired or is invalid",
    "invalid otp",
    "otp has expired",
];

/// Milliseconds since the UNIX epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn is_wrong_code(err: &ProviderError) -> bool {
    if let Some(code) = err.code() {
        return WRONG_CODE_CODES.contains(&code);
    }
    match err {
        ProviderError::Api {
            status: 400 | 403,
            message,
            ..
        } => {
            let lower = message.to_lowercase();
            WRONG_CODE_PHRASES.iter().any(|p| lower.contains(p))
        }
        _ => false,
    }
}

/// Message shown after a failed verification. Wrong or expired codes get a
/// fixed wording; everything else is passed through.
pub fn verify_failure_message(err: &ProviderError) -> String {
    if is_wrong_code(err) {
        return WRONG_CODE_MESSAGE.to_owned();
    }
    err.to_string()
}

pub struct OnboardingController<I, P, A, S> {
    identity: I,
    profiles: P,
    api: A,
    store: S,
    state: State,
    clock: fn() -> i64,
}

impl<I, P, A, S> OnboardingController<I, P, A, S>
where
    I: IdentityClient,
    P: ProfileLookup,
    A: UserApi,
    S: SessionStore,
{
    pub fn new(identity: I, profiles: P, api: A, store: S) -> Self {
        Self {
            identity,
            profiles,
            api,
            store,
            state: State::default(),
            clock: now_millis,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    fn apply(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = transition(state, &event);
    }

    fn fail(&mut self, message: impl Into<String>) {
        self.apply(Event::Failed {
            message: message.into(),
        });
    }

    pub fn edit_email(&mut self, email: &str) {
        self.apply(Event::EmailEdited(email.to_owned()));
    }

    /// Request a code for `email`; moves to the code step only if the
    /// provider accepted the request.
    pub async fn submit_email(&mut self, email: &str) {
        if self.state.step() != Step::Email {
            return;
        }
        let email = email.trim();
        self.edit_email(email);
        if email.is_empty() {
            self.fail(EMPTY_EMAIL_MESSAGE);
            return;
        }
        match self.identity.send_otp(email).await {
            Ok(()) => {
                tracing::info!(email, "one-time code sent");
                self.apply(Event::CodeSent {
                    email: email.to_owned(),
                });
            }
            Err(err) => {
                tracing::warn!(email, error = %err, "failed to send one-time code");
                self.fail(err.to_string());
            }
        }
    }

    /// Re-issue the code. Failures are only logged.
    pub async fn resend_code(&mut self) {
        if self.state.step() != Step::Otp {
            return;
        }
        let email = self.state.email().to_owned();
        if let Err(err) = self.identity.send_otp(&email).await {
            tracing::warn!(email = %email, error = %err, "failed to resend one-time code");
        }
    }

    pub fn type_digit(&mut self, index: usize, value: &str) {
        self.apply(Event::DigitTyped {
            index,
            value: value.to_owned(),
        });
    }

    pub fn backspace(&mut self, index: usize) {
        self.apply(Event::Backspace { index });
    }

    /// Verify the entered code. Named users finish immediately; others
    /// continue to the name step with the verified marker set.
    pub async fn submit_code(&mut self) {
        let State::Otp { email, otp, .. } = &self.state else {
            return;
        };
        if !otp.is_complete() {
            return;
        }
        let (email, code) = (email.clone(), otp.code());

        let user = match self.identity.verify_otp(&email, &code).await {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!(email = %email, error = %err, "one-time code rejected");
                self.fail(verify_failure_message(&err));
                return;
            }
        };

        let name = self.stored_name(&user, &email).await;
        if name.is_some() {
            marker::clear_marker(&self.store);
        } else {
            marker::mark_verified(&self.store, (self.clock)());
        }
        self.apply(Event::Verified { name });
    }

    async fn stored_name(&self, user: &SignedInUser, fallback_email: &str) -> Option<String> {
        let email = user.email.as_deref().unwrap_or(fallback_email);
        match self.profiles.find_name(&user.access_token, email).await {
            Ok(name) => name,
            Err(err) => {
                tracing::warn!(email, error = %err, "profile lookup failed");
                None
            }
        }
    }

    /// Store the display name through the backend and finish onboarding.
    pub async fn submit_name(&mut self, raw: &str) {
        if self.state.step() != Step::Info {
            return;
        }
        let name = match DisplayName::parse(raw) {
            Ok(name) => name,
            Err(NameError::Empty) => return self.fail(EMPTY_NAME_MESSAGE),
            Err(NameError::TooLong) => return self.fail(LONG_NAME_MESSAGE),
        };
        let user = match self.identity.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return self.fail(SESSION_EXPIRED_MESSAGE),
            Err(err) => return self.fail(err.to_string()),
        };

        match self.api.create_user(&user.access_token, &name).await {
            Ok(profile) => {
                marker::clear_marker(&self.store);
                let name = profile.name.unwrap_or_else(|| name.into_inner());
                self.apply(Event::ProfileSaved { name });
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile save failed");
                self.fail(err.user_message());
            }
        }
    }

    pub fn change_email(&mut self) {
        self.apply(Event::ChangeEmail);
    }

    /// Re-enter the name step for a user verified within the last five
    /// minutes who still has a session. Returns whether it did.
    pub async fn resume_profile(&mut self) -> bool {
        if self.state.step() != Step::Email {
            return false;
        }
        if !marker::is_fresh(&self.store, (self.clock)()) {
            marker::clear_marker(&self.store);
            return false;
        }
        let email = match self.identity.current_user().await {
            Ok(Some(SignedInUser {
                email: Some(email), ..
            })) => email,
            Ok(_) => return false,
            Err(err) => {
                tracing::warn!(error = %err, "session check failed");
                return false;
            }
        };
        self.apply(Event::ResumeProfile { email });
        true
    }
}
