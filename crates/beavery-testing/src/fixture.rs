//! Ready-made identities for tests.

use uuid::Uuid;

use crate::token::{TEST_JWT_SECRET, mint_access_token};

/// A signed-in test user with a valid access token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestUser {
    pub fn new(email: &str) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            email: email.to_owned(),
            token: mint_access_token(TEST_JWT_SECRET, id, email),
        }
    }

    /// Same email under a different provider id.
    pub fn with_same_email(&self) -> Self {
        Self::new(&self.email)
    }
}
