//! HTTP client for the backend API.

use beavery_domain::{DisplayName, UserProfile};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::ports::UserApi;

pub const SETUP_FAILED_MESSAGE: &str = "Failed to set up your account. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Non-2xx answer; `message` is the body's `error` field when present.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl BackendError {
    /// Text to show the user.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Transport(_) => SETUP_FAILED_MESSAGE,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

pub(crate) fn rejection(status: u16, body: &str) -> BackendError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| SETUP_FAILED_MESSAGE.to_owned());
    BackendError::Rejected { status, message }
}

#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }
}

impl UserApi for BackendClient {
    async fn create_user(
        &self,
        access_token: &str,
        name: &DisplayName,
    ) -> Result<UserProfile, BackendError> {
        let resp = self
            .client
            .post(format!("{}/auth/create-user", self.base_url))
            .bearer_auth(access_token)
            .json(&json!({ "name": name }))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(rejection(status.as_u16(), &body));
        }
        Ok(resp.json().await?)
    }
}
