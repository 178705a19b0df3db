/// API route handlers
///
/// - `products`: Product listing, revenue report and synthetic data
/// - `smoke`: Smoke-test endpoints
/// - `docs`: OpenAPI document and Swagger UI page
/// - `health`: Health check endpoint

pub mod docs;
pub mod health;
pub mod products;
pub mod smoke;

use crate::error::ApiError;
use axum::http::Uri;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
