//! Port implementations backed by the hosted provider clients.

use std::sync::{Mutex, PoisonError};

use beavery_provider::auth::AuthClient;
use beavery_provider::rest::RestClient;
use beavery_provider::{ProviderError, Session};

use crate::ports::{IdentityClient, ProfileLookup, SignedInUser};

/// [`IdentityClient`] over the hosted auth API. Holds the session obtained
/// from the last successful verification.
pub struct HostedIdentity {
    auth: AuthClient,
    session: Mutex<Option<Session>>,
}

impl HostedIdentity {
    pub fn new(auth: AuthClient) -> Self {
        Self {
            auth,
            session: Mutex::new(None),
        }
    }

    fn token(&self) -> Option<String> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    fn set_session(&self, session: Option<Session>) {
        *self.session.lock().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

impl IdentityClient for HostedIdentity {
    async fn send_otp(&self, email: &str) -> Result<(), ProviderError> {
        self.auth.send_otp(email).await
    }

    async fn verify_otp(&self, email: &str, code: &str) -> Result<SignedInUser, ProviderError> {
        let session = self.auth.verify_otp(email, code).await?;
        let user = SignedInUser {
            id: session.user.id,
            email: session.user.email.clone(),
            access_token: session.access_token.clone(),
        };
        self.set_session(Some(session));
        Ok(user)
    }

    /// Re-validates the held token with the provider; an expired or revoked
    /// token drops the session.
    async fn current_user(&self) -> Result<Option<SignedInUser>, ProviderError> {
        let Some(token) = self.token() else {
            return Ok(None);
        };
        match self.auth.get_user(&token).await {
            Ok(user) => Ok(Some(SignedInUser {
                id: user.id,
                email: user.email,
                access_token: token,
            })),
            Err(err) if err.is_auth_failure() => {
                self.set_session(None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        let token = self.token().ok_or(ProviderError::NoSession)?;
        self.set_session(None);
        self.auth.sign_out(&token).await
    }
}

impl ProfileLookup for RestClient {
    async fn find_name(
        &self,
        access_token: &str,
        email: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.find_user_name(access_token, email).await
    }
}
