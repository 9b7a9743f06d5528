//! HTTP error mapping.
//!
//! Every failure leaves the API as `{ "success": false, "error": "..." }`.
//! Validation messages are passed through verbatim; database failures are
//! logged with their cause and reported with a fixed, route-specific message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use storefront_core::{CoreError, ValidationError};
use storefront_db::DbError;

pub const PRODUCTS_FAILED: &str = "Failed to fetch products. Please try again later.";
pub const FEATURED_FAILED: &str = "Failed to fetch featured products. Please try again later.";
pub const CONTACT_FAILED: &str = "Failed to submit contact form. Please try again later.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("{0}")]
    NotFound(String),

    /// Database failure. `message` is what the client sees.
    #[error("{message}")]
    Database {
        message: &'static str,
        #[source]
        source: DbError,
    },
}

impl ApiError {
    /// Wraps a database error with the message shown to the client.
    ///
    /// Meant for `map_err`: `.map_err(ApiError::database(PRODUCTS_FAILED))`.
    pub fn database(message: &'static str) -> impl FnOnce(DbError) -> ApiError {
        move |source| match source {
            DbError::Validation(e) => ApiError::Validation(e),
            source => ApiError::Database { message, source },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::Validation(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database { message, source } = &self {
            error!(error = %source, "{}", message);
        }

        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(ValidationError::InvalidEmail).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("Route not found".into()).status(),
            StatusCode::NOT_FOUND
        );

        let err = ApiError::database(PRODUCTS_FAILED)(DbError::QueryFailed("boom".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), PRODUCTS_FAILED);
    }

    #[test]
    fn test_db_validation_stays_a_bad_request() {
        let err = ApiError::database(CONTACT_FAILED)(DbError::Validation(
            ValidationError::InvalidEmail,
        ));
        assert!(matches!(err, ApiError::Validation(ValidationError::InvalidEmail)));
        assert_eq!(err.to_string(), "Invalid email format.");
    }
}
