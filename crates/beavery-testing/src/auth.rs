//! Authorization header helpers for integration tests.

use http::HeaderValue;

/// `Bearer <token>` as a header value.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_bearer_header() {
        assert_eq!(bearer("abc"), "Bearer abc");
    }
}
