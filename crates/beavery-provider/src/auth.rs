//! Hosted auth API client.

use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;
use uuid::Uuid;

use crate::error::ProviderError;
use crate::types::{ProviderUser, Session};

/// Client for the provider's `/auth/v1` endpoints.
///
/// `api_key` is sent as the `apikey` header on every call. Construct with the
/// anon key for end-user calls, or with the service-role key to use
/// [`AuthClient::update_user_metadata`].
#[derive(Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    fn with_key(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
    }

    /// Email a one-time code, creating the provider account if needed.
    pub async fn send_otp(&self, email: &str) -> Result<(), ProviderError> {
        let resp = self
            .with_key(self.client.post(self.url("/otp")))
            .json(&json!({ "email": email, "create_user": true }))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Exchange an emailed one-time code for a session.
    pub async fn verify_otp(&self, email: &str, code: &str) -> Result<Session, ProviderError> {
        let resp = self
            .with_key(self.client.post(self.url("/verify")))
            .json(&json!({ "type": "email", "email": email, "token": code }))
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Resolve an access token to its user. Fails with 401/403 for invalid or
    /// expired tokens.
    pub async fn get_user(&self, access_token: &str) -> Result<ProviderUser, ProviderError> {
        let resp = self
            .with_key(self.client.get(self.url("/user")))
            .bearer_auth(access_token)
            .send()
            .await?;
        Ok(check(resp).await?.json().await?)
    }

    /// Revoke the session behind `access_token`.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), ProviderError> {
        let resp = self
            .with_key(self.client.post(self.url("/logout")))
            .bearer_auth(access_token)
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }

    /// Merge `metadata` into a user's metadata through the admin API.
    /// Requires a client built with the service-role key.
    pub async fn update_user_metadata(
        &self,
        user_id: Uuid,
        metadata: serde_json::Value,
    ) -> Result<(), ProviderError> {
        let resp = self
            .with_key(self.client.put(self.url(&format!("/admin/users/{user_id}"))))
            .bearer_auth(&self.api_key)
            .json(&json!({ "user_metadata": metadata }))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Pass successful responses through; turn the rest into [`ProviderError::Api`].
pub(crate) async fn check(resp: Response) -> Result<Response, ProviderError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), body = %body, "provider request failed");
    Err(ProviderError::from_body(status.as_u16(), &body))
}
