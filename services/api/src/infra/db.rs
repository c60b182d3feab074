use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, DbErr, EntityTrait, Insert, RuntimeErr, SqlErr,
    sea_query::OnConflict,
};

use beavery_api_schema::users;
use beavery_domain::{UserId, UserProfile};

use crate::domain::repository::UserRepository;
use crate::domain::types::NewUser;
use crate::error::ApiError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn upsert(&self, user: &NewUser) -> Result<UserProfile, ApiError> {
        let model = upsert_statement(user, Utc::now())
            .exec_with_returning(&self.db)
            .await
            .map_err(upsert_error)?;
        Ok(profile_from_model(model))
    }
}

/// Insert the row, or on an id conflict replace only `name` and `updated_at`.
fn upsert_statement(user: &NewUser, now: DateTime<Utc>) -> Insert<users::ActiveModel> {
    let am = users::ActiveModel {
        id: Set(user.id.0),
        email: Set(user.email.clone()),
        name: Set(Some(user.name.as_str().to_owned())),
        created_at: Set(now),
        updated_at: Set(now),
    };
    users::Entity::insert(am).on_conflict(
        OnConflict::column(users::Column::Id)
            .update_columns([users::Column::Name, users::Column::UpdatedAt])
            .to_owned(),
    )
}

fn profile_from_model(model: users::Model) -> UserProfile {
    UserProfile {
        id: UserId(model.id),
        email: model.email,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// Unique violations left after the id conflict is handled come from the
/// email constraint.
fn upsert_error(err: DbErr) -> ApiError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return ApiError::UserAlreadyExists;
    }
    ApiError::Database {
        code: sqlstate(&err),
        message: err.to_string(),
    }
}

fn sqlstate(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned()),
        _ => None,
    }
}
