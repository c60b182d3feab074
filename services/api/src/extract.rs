use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use beavery_auth_types::bearer::bearer_token;

use crate::domain::repository::{IdentityPort, UserRepository};
use crate::domain::types::VerifiedIdentity;
use crate::error::ApiError;
use crate::state::AppState;

/// Caller authenticated by `Authorization: Bearer <access token>`.
///
/// Rejects with 401 before the request body is read.
#[derive(Debug, Clone)]
pub struct AuthUser(pub VerifiedIdentity);

impl<R, I> FromRequestParts<AppState<R, I>> for AuthUser
where
    R: UserRepository,
    I: IdentityPort,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R, I>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(ApiError::MissingToken)?;
        let identity = state.identity.verify(&token).await?;
        Ok(Self(identity))
    }
}
