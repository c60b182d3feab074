use serde::Deserialize;

/// Failure talking to the hosted auth API or the REST query layer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    /// The request never got a usable answer.
    #[error("request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A signed-in session was required but none is held.
    #[error("not signed in")]
    NoSession,
}

impl ProviderError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error code such as `otp_expired` or `23505`.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True when the provider rejected the caller's credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403)) || matches!(self, Self::NoSession)
    }

    /// Build an [`ProviderError::Api`] from a failed response body.
    ///
    /// The auth API and the REST layer use different error shapes; every
    /// known field is tried before falling back to the status line.
    pub fn from_body(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed
            .error_code
            .or_else(|| parsed.code.and_then(string_code))
            .or_else(|| parsed.error.clone());
        let message = parsed
            .msg
            .or(parsed.message)
            .or(parsed.error_description)
            .or(parsed.error)
            .unwrap_or_else(|| format!("provider returned HTTP {status}"));
        Self::Api {
            status,
            code,
            message,
        }
    }
}

#[derive(Default, Deserialize)]
struct ErrorBody {
    error_code: Option<String>,
    // auth API sends a numeric status here, the REST layer a SQLSTATE string
    code: Option<serde_json::Value>,
    error: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

fn string_code(v: serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    }
}
