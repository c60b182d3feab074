use crate::infra::db::DbUserRepository;
use crate::infra::identity::ProviderIdentity;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState<R, I> {
    pub users: R,
    pub identity: I,
}

/// State wired to Postgres and the hosted identity provider.
pub type LiveState = AppState<DbUserRepository, ProviderIdentity>;
