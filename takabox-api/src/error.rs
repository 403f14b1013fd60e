use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Unified API error. Handlers return `Result<_, ApiError>` and the
/// conversion below turns every failure into a JSON body of the shape
/// `{"error": "..."}` with a matching status code.
#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::Anyhow(err) => {
                tracing::error!(error = ?err, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

// Lets handlers use `?` on anything convertible to a boxed error, most
// notably the boxed errors coming out of the repository traits.
impl<E> From<E> for ApiError
where
    E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    fn from(err: E) -> Self {
        ApiError::Anyhow(anyhow::Error::from_boxed(err.into()))
    }
}
