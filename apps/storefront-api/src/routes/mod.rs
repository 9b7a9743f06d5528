//! Route handlers, grouped by resource.

pub mod contact;
pub mod health;
pub mod products;

use crate::error::ApiError;

/// Fallback for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}
