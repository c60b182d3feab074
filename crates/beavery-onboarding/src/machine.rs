//! The onboarding step machine.
//!
//! [`transition`] is pure: the controller performs the network calls and
//! feeds their outcome back in as an [`Event`].

use crate::otp::OtpInput;

/// Which form is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Email,
    Otp,
    Info,
    Welcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Email {
        email: String,
        error: Option<String>,
    },
    Otp {
        email: String,
        otp: OtpInput,
        error: Option<String>,
    },
    Info {
        email: String,
        error: Option<String>,
    },
    /// Onboarding finished; the next view is the dashboard.
    Welcome { email: String, name: String },
}

impl Default for State {
    fn default() -> Self {
        Self::Email {
            email: String::new(),
            error: None,
        }
    }
}

impl State {
    pub fn step(&self) -> Step {
        match self {
            Self::Email { .. } => Step::Email,
            Self::Otp { .. } => Step::Otp,
            Self::Info { .. } => Step::Info,
            Self::Welcome { .. } => Step::Welcome,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Self::Email { email, .. }
            | Self::Otp { email, .. }
            | Self::Info { email, .. }
            | Self::Welcome { email, .. } => email,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Email { error, .. } | Self::Otp { error, .. } | Self::Info { error, .. } => {
                error.as_deref()
            }
            Self::Welcome { .. } => None,
        }
    }

    pub fn otp(&self) -> Option<&OtpInput> {
        match self {
            Self::Otp { otp, .. } => Some(otp),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The email field changed.
    EmailEdited(String),
    /// The provider accepted the send-code request.
    CodeSent { email: String },
    DigitTyped { index: usize, value: String },
    Backspace { index: usize },
    /// Code verified; `name` is the stored display name, if any.
    Verified { name: Option<String> },
    /// The backend stored the profile.
    ProfileSaved { name: String },
    /// Re-enter the name step after a verification on an earlier visit.
    ResumeProfile { email: String },
    /// A call failed or local validation rejected the input.
    Failed { message: String },
    ChangeEmail,
}

/// Next state for `event`. Events that do not apply to the current step
/// leave the state unchanged.
pub fn transition(state: State, event: &Event) -> State {
    match (state, event) {
        (State::Email { .. }, Event::EmailEdited(email)) => State::Email {
            email: email.clone(),
            error: None,
        },
        (State::Email { .. }, Event::CodeSent { email }) => State::Otp {
            email: email.clone(),
            otp: OtpInput::new(),
            error: None,
        },
        (State::Email { .. }, Event::ResumeProfile { email }) => State::Info {
            email: email.clone(),
            error: None,
        },
        (State::Email { email, .. }, Event::Failed { message }) => State::Email {
            email,
            error: Some(message.clone()),
        },

        (State::Otp { email, mut otp, error }, Event::DigitTyped { index, value }) => {
            otp.input(*index, value);
            State::Otp { email, otp, error }
        }
        (State::Otp { email, mut otp, error }, Event::Backspace { index }) => {
            otp.backspace(*index);
            State::Otp { email, otp, error }
        }
        (State::Otp { email, .. }, Event::Verified { name: Some(name) })
            if !name.trim().is_empty() =>
        {
            State::Welcome {
                email,
                name: name.clone(),
            }
        }
        (State::Otp { email, .. }, Event::Verified { .. }) => State::Info { email, error: None },
        (State::Otp { email, .. }, Event::Failed { message }) => State::Otp {
            email,
            otp: OtpInput::new(),
            error: Some(message.clone()),
        },

        (State::Info { email, .. }, Event::ProfileSaved { name }) => State::Welcome {
            email,
            name: name.clone(),
        },
        (State::Info { email, .. }, Event::Failed { message }) => State::Info {
            email,
            error: Some(message.clone()),
        },

        (state, Event::ChangeEmail) => State::Email {
            email: state.email().to_owned(),
            error: None,
        },

        (state, _) => state,
    }
}
