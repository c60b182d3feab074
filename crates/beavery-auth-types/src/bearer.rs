//! `Authorization: Bearer <token>` parsing.

use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::HeaderMap;

/// Return the bearer token from the `Authorization` header.
///
/// `None` when the header is absent, uses another scheme, or carries an
/// empty token.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_owned())
        .filter(|token| !token.is_empty())
}
