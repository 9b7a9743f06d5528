//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Contact form / catalog input failures           │
//! │                                                                         │
//! │  storefront-db        └── DbError       - Database failures             │
//! │  storefront-cart      └── StorageError  - Cart blob I/O (never surfaced)│
//! │  storefront-api       └── ApiError      - What the browser sees         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → { success: false }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart reducer has no error type at all: every transition is total.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Catalog and contact operations return this; the API layer maps it to a
/// 400 response.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The messages of `MissingContactFields` and `InvalidEmail` are shown to
/// the browser verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of first name, last name, email or message is absent or blank.
    #[error("Missing required fields. Please provide first name, last name, email, and message.")]
    MissingContactFields,

    /// Email does not look like `local@domain.tld`.
    #[error("Invalid email format.")]
    InvalidEmail,

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
