use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use beavery_domain::NameError;

/// API error variants. Every variant maps to one status and one `kind`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No authorization token provided")]
    MissingToken,
    #[error("Invalid or expired token")]
    InvalidToken,
    /// The identity provider could not be asked.
    #[error("Authentication failed")]
    AuthenticationFailed(#[source] anyhow::Error),
    #[error("Invalid JSON body")]
    InvalidBody,
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be 255 characters or less")]
    NameTooLong,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("Failed to create user")]
    Database {
        code: Option<String>,
        message: String,
    },
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::AuthenticationFailed(_) => "AUTHENTICATION_FAILED",
            Self::InvalidBody => "INVALID_BODY",
            Self::NameRequired => "NAME_REQUIRED",
            Self::NameTooLong => "NAME_TOO_LONG",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::Database { .. } => "DATABASE",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingToken | Self::InvalidToken | Self::AuthenticationFailed(_) => {
                StatusCode::UNAUTHORIZED
            }
            Self::InvalidBody | Self::NameRequired | Self::NameTooLong => StatusCode::BAD_REQUEST,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NameError> for ApiError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Empty => Self::NameRequired,
            NameError::TooLong => Self::NameTooLong,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "error": self.to_string(),
        });
        match &self {
            Self::Database { code, message } => {
                tracing::error!(code = ?code, message = %message, kind = "DATABASE", "database error");
                body["details"] = serde_json::json!({ "code": code, "message": message });
            }
            Self::AuthenticationFailed(e) => {
                tracing::error!(error = %e, kind = "AUTHENTICATION_FAILED", "token check failed");
            }
            _ => {}
        }
        (self.status(), axum::Json(body)).into_response()
    }
}
