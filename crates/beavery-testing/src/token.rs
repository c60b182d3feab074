//! Access tokens shaped like the identity provider's, signed with a test secret.

use std::time::{SystemTime, UNIX_EPOCH};

use beavery_auth_types::token::{AUTHENTICATED_AUDIENCE, AccessClaims};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "beavery-test-jwt-secret";

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// HS256 token for `user_id`/`email` valid for one hour.
pub fn mint_access_token(secret: &str, user_id: Uuid, email: &str) -> String {
    mint_with_exp(secret, user_id, Some(email), now_secs() + 3600)
}

/// Token that expired an hour ago.
pub fn mint_expired_token(secret: &str, user_id: Uuid, email: &str) -> String {
    mint_with_exp(secret, user_id, Some(email), now_secs() - 3600)
}

pub fn mint_with_exp(secret: &str, user_id: Uuid, email: Option<&str>, exp: u64) -> String {
    let claims = AccessClaims {
        sub: user_id.to_string(),
        email: email.map(str::to_owned),
        aud: AUTHENTICATED_AUDIENCE.to_owned(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
