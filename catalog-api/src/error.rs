/// Error handling for the API server
///
/// Every handler returns `ApiResult<T>`; failures are rendered as the
/// failure envelope:
///
/// ```json
/// { "success": false, "message": "Internal Server Error", "error": "Database error: ..." }
/// ```
///
/// `error` carries the text of the error that was actually caught. It is
/// omitted for validation failures, where `message` already says what is wrong.
///
/// # Example
///
/// ```
/// use catalog_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler(num: &str) -> ApiResult<Json<Value>> {
///     let n: u32 = num
///         .parse()
///         .map_err(|_| ApiError::BadRequest("num must be a number".to_string()))?;
///     Ok(Json(json!({ "success": true, "num": n })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_shared::{report::ReportError, store::StoreError};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - malformed or invalid input
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Store failure (500)
    Store(StoreError),

    /// Internal server error (500)
    InternalError(String),
}

/// Failure envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message
    pub message: String,

    /// Text of the underlying error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Store(err) => write!(f, "Store error: {}", err),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (message, error) = match self {
            ApiError::BadRequest(msg) => (msg, None),
            ApiError::NotFound(msg) => (msg, None),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                ("Internal Server Error".to_string(), Some(err.to_string()))
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("Internal Server Error".to_string(), Some(msg))
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
            error,
        });

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Store(StoreError::Database(err))
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
