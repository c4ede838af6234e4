//! Error types for the API crate.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};
use snipbin_core::ValidationError;
use uuid::Uuid;

/// Errors that can occur during request handling.
///
/// Every variant is terminal for the request: nothing is retried and
/// nothing is partially applied.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The payload failed per-field validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A mutating call arrived without a resolvable identity.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The acting identity is not the snippet's owner.
    #[error("you do not have permission to modify this snippet")]
    PermissionDenied,

    /// The snippet ID does not resolve.
    #[error("snippet not found: {0}")]
    SnippetNotFound(Uuid),

    /// The user ID does not resolve.
    #[error("user not found: {0}")]
    UserNotFound(Uuid),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({"errors": by_field(&errors)})))
                    .into_response()
            }
            ApiError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, Json(json!({"error": self.to_string()})))
                    .into_response()
            }
            ApiError::PermissionDenied => {
                (StatusCode::FORBIDDEN, Json(json!({"error": self.to_string()}))).into_response()
            }
            ApiError::SnippetNotFound(_) | ApiError::UserNotFound(_) => {
                (StatusCode::NOT_FOUND, Json(json!({"error": self.to_string()}))).into_response()
            }
        }
    }
}

/// Groups validation messages by field: `{"code": ["…"], "style": ["…"]}`.
fn by_field(errors: &ValidationError) -> Value {
    let mut fields = Map::new();
    for (field, message) in errors.iter() {
        let entry = fields.entry(field.to_owned()).or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(Value::String(message.to_owned()));
        }
    }
    Value::Object(fields)
}
