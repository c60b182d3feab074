//! Access-token validation.
//!
//! The hosted identity provider signs access tokens with the project's HS256
//! secret. When that secret is configured the API validates tokens locally
//! instead of asking the provider on every request.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "testing", test))]
use serde::Serialize;
use uuid::Uuid;

/// Audience the provider stamps on tokens of signed-in users.
pub const AUTHENTICATED_AUDIENCE: &str = "authenticated";

/// Identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// Claims of a provider access token. Only the fields used here are decoded.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "testing", test), derive(Serialize))]
pub struct AccessClaims {
    /// Provider user id (UUID string).
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub aud: String,
    /// Expiration, seconds since UNIX epoch.
    pub exp: u64,
}

/// Validate an access token and return the caller's identity.
///
/// HS256, `exp` enforced with the default 60s leeway, `aud` must be
/// `authenticated`, `sub` must be a UUID.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "sub", "aud"]);

    let data = decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    let claims = data.claims;
    let user_id = claims.sub.parse::<Uuid>().map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        email: claims.email,
        exp: claims.exp,
    })
}
