use beavery_domain::{DisplayName, UserId};

/// Caller identity established from a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: UserId,
    pub email: String,
}

/// Row to insert, or to merge into an existing row with the same id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub email: String,
    pub name: DisplayName,
}
