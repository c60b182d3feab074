use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::header::AUTHORIZATION;
use axum_test::{TestRequest, TestServer};
use chrono::Utc;

use beavery_api::domain::repository::{IdentityPort, UserRepository};
use beavery_api::domain::types::{NewUser, VerifiedIdentity};
use beavery_api::error::ApiError;
use beavery_api::router::build_router;
use beavery_api::state::AppState;
use beavery_domain::{DisplayName, UserId, UserProfile};
use beavery_testing::auth::bearer;
use beavery_testing::fixture::TestUser;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

/// In-memory `users` table with the same conflict rules as the Postgres
/// upsert: same id updates the name, same email under another id conflicts.
#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub rows: Arc<Mutex<Vec<UserProfile>>>,
    pub broken: bool,
}

impl MockUserRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every write fails with a database error.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn rows(&self) -> Vec<UserProfile> {
        self.rows.lock().unwrap().clone()
    }
}

impl UserRepository for MockUserRepo {
    async fn upsert(&self, user: &NewUser) -> Result<UserProfile, ApiError> {
        if self.broken {
            return Err(ApiError::Database {
                code: Some("57P01".into()),
                message: "terminating connection due to administrator command".into(),
            });
        }
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        if let Some(row) = rows.iter_mut().find(|r| r.id == user.id) {
            row.name = Some(user.name.as_str().to_owned());
            row.updated_at = now;
            return Ok(row.clone());
        }
        if rows.iter().any(|r| r.email == user.email) {
            return Err(ApiError::UserAlreadyExists);
        }
        let row = UserProfile {
            id: user.id,
            email: user.email.clone(),
            name: Some(user.name.as_str().to_owned()),
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        Ok(row)
    }
}

// ── MockIdentity ─────────────────────────────────────────────────────────────

/// Identity provider that knows a fixed set of tokens.
#[derive(Clone, Default)]
pub struct MockIdentity {
    pub tokens: Arc<HashMap<String, VerifiedIdentity>>,
    pub unavailable: bool,
    pub mirror_fails: bool,
    pub mirrored: Arc<Mutex<Vec<(UserId, String)>>>,
}

impl MockIdentity {
    pub fn with_users(users: &[&TestUser]) -> Self {
        let tokens = users
            .iter()
            .map(|u| {
                (
                    u.token.clone(),
                    VerifiedIdentity {
                        user_id: UserId(u.id),
                        email: u.email.clone(),
                    },
                )
            })
            .collect();
        Self {
            tokens: Arc::new(tokens),
            ..Self::default()
        }
    }

    pub fn mirrored(&self) -> Vec<(UserId, String)> {
        self.mirrored.lock().unwrap().clone()
    }
}

impl IdentityPort for MockIdentity {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, ApiError> {
        if self.unavailable {
            return Err(ApiError::AuthenticationFailed(anyhow::anyhow!(
                "provider unreachable"
            )));
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(ApiError::InvalidToken)
    }

    async fn mirror_name(&self, user_id: UserId, name: &DisplayName) -> anyhow::Result<()> {
        if self.mirror_fails {
            anyhow::bail!("admin api returned 500");
        }
        self.mirrored
            .lock()
            .unwrap()
            .push((user_id, name.as_str().to_owned()));
        Ok(())
    }
}

// ── Server ───────────────────────────────────────────────────────────────────

pub fn server(repo: MockUserRepo, identity: MockIdentity) -> TestServer {
    TestServer::new(build_router(AppState {
        users: repo,
        identity,
    }))
    .unwrap()
}

pub fn with_token(req: TestRequest, token: &str) -> TestRequest {
    req.add_header(AUTHORIZATION, bearer(token))
}
