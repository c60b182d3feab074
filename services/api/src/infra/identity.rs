use anyhow::Context as _;
use serde_json::json;

use beavery_auth_types::token::validate_access_token;
use beavery_domain::{DisplayName, UserId};
use beavery_provider::auth::AuthClient;

use crate::config::ApiConfig;
use crate::domain::repository::IdentityPort;
use crate::domain::types::VerifiedIdentity;
use crate::error::ApiError;

/// Identity checks against the hosted provider.
///
/// With a JWT secret configured, tokens are validated locally. Otherwise the
/// provider's `/user` endpoint decides.
#[derive(Clone)]
pub struct ProviderIdentity {
    auth: AuthClient,
    admin: AuthClient,
    jwt_secret: Option<String>,
}

impl ProviderIdentity {
    pub fn new(auth: AuthClient, admin: AuthClient, jwt_secret: Option<String>) -> Self {
        Self {
            auth,
            admin,
            jwt_secret,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            AuthClient::new(&config.supabase_url, &config.anon_key),
            AuthClient::new(&config.supabase_url, &config.service_role_key),
            config.jwt_secret.clone(),
        )
    }
}

impl IdentityPort for ProviderIdentity {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, ApiError> {
        let (user_id, email) = match &self.jwt_secret {
            Some(secret) => {
                let info = validate_access_token(token, secret).map_err(|e| {
                    tracing::debug!(error = %e, "access token rejected");
                    ApiError::InvalidToken
                })?;
                (info.user_id, info.email)
            }
            None => match self.auth.get_user(token).await {
                Ok(user) => (user.id, user.email),
                Err(e) if e.status().is_some_and(|s| (400..500).contains(&s)) => {
                    tracing::debug!(error = %e, "access token rejected by provider");
                    return Err(ApiError::InvalidToken);
                }
                Err(e) => {
                    return Err(ApiError::AuthenticationFailed(
                        anyhow::Error::new(e).context("fetch user from provider"),
                    ));
                }
            },
        };

        let email = email
            .filter(|e| !e.trim().is_empty())
            .ok_or(ApiError::InvalidToken)?;
        Ok(VerifiedIdentity {
            user_id: UserId(user_id),
            email,
        })
    }

    async fn mirror_name(&self, user_id: UserId, name: &DisplayName) -> anyhow::Result<()> {
        self.admin
            .update_user_metadata(user_id.0, json!({ "name": name.as_str() }))
            .await
            .context("update provider user metadata")
    }
}

#[cfg(test)]
mod tests {
    use beavery_testing::token::{
        TEST_JWT_SECRET, mint_access_token, mint_expired_token, mint_with_exp,
    };
    use uuid::Uuid;

    use super::*;

    fn local() -> ProviderIdentity {
        let unreachable = AuthClient::new("http://127.0.0.1:9", "key");
        ProviderIdentity::new(
            unreachable.clone(),
            unreachable,
            Some(TEST_JWT_SECRET.to_owned()),
        )
    }

    #[tokio::test]
    async fn should_verify_locally_signed_token() {
        let id = Uuid::new_v4();
        let token = mint_access_token(TEST_JWT_SECRET, id, "user@example.com");
        let identity = local().verify(&token).await.unwrap();
        assert_eq!(identity.user_id, UserId(id));
        assert_eq!(identity.email, "user@example.com");
    }

    #[tokio::test]
    async fn should_reject_expired_token() {
        let token = mint_expired_token(TEST_JWT_SECRET, Uuid::new_v4(), "user@example.com");
        let err = local().verify(&token).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn should_reject_token_without_email() {
        let exp = chrono::Utc::now().timestamp() as u64 + 600;
        let token = mint_with_exp(TEST_JWT_SECRET, Uuid::new_v4(), None, exp);
        let err = local().verify(&token).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn should_fail_authentication_when_provider_unreachable() {
        let unreachable = AuthClient::new("http://127.0.0.1:9", "key");
        let identity = ProviderIdentity::new(unreachable.clone(), unreachable, None);
        let err = identity.verify("opaque").await.unwrap_err();
        assert!(matches!(err, ApiError::AuthenticationFailed(_)));
    }
}
