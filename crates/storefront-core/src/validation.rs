//! # Validation Module
//!
//! Input validation for contact submissions and catalog inserts.
//!
//! ## Contact Form Flow
//! ```text
//! ContactForm (raw JSON / form body, aliased field names)
//!      │
//!      ▼
//! trim every field
//!      │
//!      ├── any field blank ───────► MissingContactFields
//!      ├── email not a@b.c ───────► InvalidEmail
//!      ├── field over its cap ────► TooLong
//!      ▼
//! ContactSubmission (ready to INSERT)
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::validate_contact;
//! use storefront_core::ContactForm;
//!
//! let form = ContactForm {
//!     firstname: Some("Ada".into()),
//!     lastname: Some("Lovelace".into()),
//!     email: Some("ada@example.com".into()),
//!     subject: Some("Hello".into()),
//!     ..Default::default()
//! };
//! let submission = validate_contact(&form).unwrap();
//! assert_eq!(submission.first_name, "Ada");
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::types::{ContactForm, ContactSubmission, NewProduct};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a first or last name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of a contact message.
pub const MAX_MESSAGE_LEN: usize = 5000;

// =============================================================================
// Contact Submissions
// =============================================================================

/// Validates a contact form and returns the trimmed submission.
///
/// ## Rules
/// - first name, last name, email and message are all required
/// - email must have the shape `local@domain.tld` with no whitespace
/// - length caps: names 100, email 254, message 5000 characters
pub fn validate_contact(form: &ContactForm) -> ValidationResult<ContactSubmission> {
    let first_name = form.first_name().trim();
    let last_name = form.last_name().trim();
    let email = form.email().trim();
    let message = form.message().trim();

    if [first_name, last_name, email, message]
        .iter()
        .any(|value| value.is_empty())
    {
        return Err(ValidationError::MissingContactFields);
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    check_len("first_name", first_name, MAX_NAME_LEN)?;
    check_len("last_name", last_name, MAX_NAME_LEN)?;
    check_len("email", email, MAX_EMAIL_LEN)?;
    check_len("message", message, MAX_MESSAGE_LEN)?;

    Ok(ContactSubmission {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
});

/// Checks the `^[^\s@]+@[^\s@]+\.[^\s@]+$` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn check_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

// =============================================================================
// Catalog
// =============================================================================

/// Validates a product before it is inserted into the catalog.
///
/// The price is kept as text; it only has to be non-blank; anything the
/// normalizer cannot read is sold as zero.
pub fn validate_new_product(product: &NewProduct) -> ValidationResult<()> {
    let name = product.product_name.trim();
    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product_name".to_string(),
        });
    }
    check_len("product_name", name, 200)?;

    if product.product_price.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form(first: &str, last: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_contact_is_trimmed() {
        let submission =
            validate_contact(&form("  Ada ", "Lovelace", " ada@example.com ", " Hi ")).unwrap();
        assert_eq!(submission.first_name, "Ada");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.message, "Hi");
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_contact(&form("Ada", "", "ada@example.com", "Hi")),
            Err(ValidationError::MissingContactFields)
        );
        assert_eq!(
            validate_contact(&form("Ada", "Lovelace", "ada@example.com", "   ")),
            Err(ValidationError::MissingContactFields)
        );
        assert_eq!(
            validate_contact(&ContactForm::default()),
            Err(ValidationError::MissingContactFields)
        );
    }

    #[test]
    fn test_invalid_email() {
        assert_eq!(
            validate_contact(&form("Ada", "Lovelace", "not-an-email", "Hi")),
            Err(ValidationError::InvalidEmail)
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@mail.example.org"));
        assert!(is_valid_email("a@b..c"));

        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email("a@b."));
        assert!(!is_valid_email("a@b@c.d"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b.c\n"));
        assert!(!is_valid_email("a@b\t.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_length_caps() {
        let long_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate_contact(&form(&long_name, "L", "a@b.c", "m")),
            Err(ValidationError::TooLong { max: MAX_NAME_LEN, .. })
        ));

        let long_message = "m".repeat(MAX_MESSAGE_LEN + 1);
        assert!(matches!(
            validate_contact(&form("A", "L", "a@b.c", &long_message)),
            Err(ValidationError::TooLong { max: MAX_MESSAGE_LEN, .. })
        ));
    }

    #[test]
    fn test_new_product() {
        let mut product = NewProduct {
            img_path: None,
            product_name: "Mug".to_string(),
            product_description: String::new(),
            product_price: "8.00".to_string(),
        };
        assert!(validate_new_product(&product).is_ok());

        product.product_price = " ".to_string();
        assert!(matches!(
            validate_new_product(&product),
            Err(ValidationError::Required { .. })
        ));
    }
}
