use axum::Json;
use axum::http::{StatusCode, Uri};
use serde_json::{Value, json};

/// Router fallback: every unmatched route gets a JSON 404 naming the path.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "path": uri.path(),
        })),
    )
}
