use std::future::Future;

use beavery_domain::{DisplayName, UserId, UserProfile};

use crate::domain::types::{NewUser, VerifiedIdentity};
use crate::error::ApiError;

/// Repository for user profiles.
pub trait UserRepository: Send + Sync {
    /// Insert `user`, or, when a row with the same id exists, replace its
    /// `name` and bump `updated_at`. `email` and `created_at` of an existing
    /// row are kept. Runs as a single statement.
    ///
    /// A different row holding the same email fails with
    /// [`ApiError::UserAlreadyExists`].
    fn upsert(&self, user: &NewUser) -> impl Future<Output = Result<UserProfile, ApiError>> + Send;
}

/// The identity provider as seen by the API.
pub trait IdentityPort: Send + Sync {
    /// Resolve a bearer token to the caller's identity.
    fn verify(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<VerifiedIdentity, ApiError>> + Send;

    /// Copy the display name into the provider's per-user metadata.
    fn mirror_name(
        &self,
        user_id: UserId,
        name: &DisplayName,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}
