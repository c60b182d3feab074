use beavery_domain::{DisplayName, UserProfile};

use crate::domain::repository::{IdentityPort, UserRepository};
use crate::domain::types::{NewUser, VerifiedIdentity};
use crate::error::ApiError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserUseCase<R: UserRepository, I: IdentityPort> {
    pub repo: R,
    pub identity: I,
}

impl<R: UserRepository, I: IdentityPort> CreateUserUseCase<R, I> {
    /// Validate `raw_name`, upsert the caller's row and mirror the name into
    /// the provider's metadata. A failed mirror is logged and ignored.
    pub async fn execute(
        &self,
        caller: VerifiedIdentity,
        raw_name: &str,
    ) -> Result<UserProfile, ApiError> {
        let name = DisplayName::parse(raw_name)?;
        let user = NewUser {
            id: caller.user_id,
            email: caller.email,
            name,
        };
        let profile = self.repo.upsert(&user).await?;

        if let Err(e) = self.identity.mirror_name(user.id, &user.name).await {
            tracing::warn!(user_id = %user.id, error = %e, "failed to mirror name into provider metadata");
        }
        Ok(profile)
    }
}
