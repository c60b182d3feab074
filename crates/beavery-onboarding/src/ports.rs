#![allow(async_fn_in_trait)]

use std::sync::Arc;

use beavery_domain::{DisplayName, UserProfile};
use beavery_provider::ProviderError;
use uuid::Uuid;

use crate::backend::BackendError;

/// The signed-in user together with the token that proves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
}

/// Authentication verbs of the identity provider. Implementations hold the
/// current session.
pub trait IdentityClient: Send + Sync {
    /// Email a one-time code, creating the account if needed.
    async fn send_otp(&self, email: &str) -> Result<(), ProviderError>;
    /// Verify the code and keep the resulting session.
    async fn verify_otp(&self, email: &str, code: &str) -> Result<SignedInUser, ProviderError>;
    /// The user of the held session, `None` when signed out.
    async fn current_user(&self) -> Result<Option<SignedInUser>, ProviderError>;
    async fn sign_out(&self) -> Result<(), ProviderError>;
}

/// Read access to stored profiles.
pub trait ProfileLookup: Send + Sync {
    /// Non-blank stored name for `email`, if a row exists.
    async fn find_name(&self, access_token: &str, email: &str)
    -> Result<Option<String>, ProviderError>;
}

/// The backend's user endpoint.
pub trait UserApi: Send + Sync {
    async fn create_user(
        &self,
        access_token: &str,
        name: &DisplayName,
    ) -> Result<UserProfile, BackendError>;
}

impl<T: IdentityClient> IdentityClient for Arc<T> {
    async fn send_otp(&self, email: &str) -> Result<(), ProviderError> {
        (**self).send_otp(email).await
    }
    async fn verify_otp(&self, email: &str, code: &str) -> Result<SignedInUser, ProviderError> {
        (**self).verify_otp(email, code).await
    }
    async fn current_user(&self) -> Result<Option<SignedInUser>, ProviderError> {
        (**self).current_user().await
    }
    async fn sign_out(&self) -> Result<(), ProviderError> {
        (**self).sign_out().await
    }
}

impl<T: ProfileLookup> ProfileLookup for Arc<T> {
    async fn find_name(
        &self,
        access_token: &str,
        email: &str,
    ) -> Result<Option<String>, ProviderError> {
        (**self).find_name(access_token, email).await
    }
}
