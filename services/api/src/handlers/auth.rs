use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use beavery_domain::UserProfile;

use crate::domain::repository::{IdentityPort, UserRepository};
use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::state::AppState;
use crate::usecase::user::CreateUserUseCase;

// ── GET /auth/test ───────────────────────────────────────────────────────────

pub async fn auth_test() -> Json<Value> {
    Json(json!({ "message": "Auth router is working!" }))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn me(AuthUser(caller): AuthUser) -> Json<Value> {
    Json(json!({
        "message": "You are authenticated!",
        "user": {
            "id": caller.user_id,
            "email": caller.email,
        },
    }))
}

// ── POST /auth/create-user ───────────────────────────────────────────────────

/// `name` stays untyped so a non-string value is a validation error rather
/// than a body rejection.
#[derive(Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<Value>,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    #[serde(serialize_with = "beavery_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "beavery_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserProfile> for UserResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub async fn create_user<R, I>(
    AuthUser(caller): AuthUser,
    State(state): State<AppState<R, I>>,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError>
where
    R: UserRepository + Clone,
    I: IdentityPort + Clone,
{
    let Json(body) = body.map_err(|e| {
        tracing::debug!(error = %e, "create-user body rejected");
        ApiError::InvalidBody
    })?;
    let name = match body.name {
        Some(Value::String(name)) => name,
        _ => return Err(ApiError::NameRequired),
    };

    let usecase = CreateUserUseCase {
        repo: state.users.clone(),
        identity: state.identity.clone(),
    };
    let user = usecase.execute(caller, &name).await?;
    Ok(Json(user.into()))
}
