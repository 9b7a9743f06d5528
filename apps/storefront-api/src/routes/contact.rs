//! Contact form submission.
//!
//! The form posts either JSON or `application/x-www-form-urlencoded`; both
//! land in the same [`ContactForm`] and go through the same validation.

use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Serialize;
use tracing::info;

use storefront_core::validation::validate_contact;
use storefront_core::ContactForm;

use crate::error::{ApiError, CONTACT_FAILED};
use crate::AppState;

pub const CONTACT_SUBMITTED: &str = "Contact form submitted successfully!";

/// A contact form decoded from either body encoding.
#[derive(Debug)]
pub struct ContactPayload(pub ContactForm);

impl<S> FromRequest<S> for ContactPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        let form = if is_form {
            let Form(form) = Form::<ContactForm>::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            form
        } else {
            let Json(form) = Json::<ContactForm>::from_request(req, state)
                .await
                .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
            form
        };

        Ok(ContactPayload(form))
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: i64,
}

/// `POST /api/contact` (also mounted at the legacy `/api/insert`).
pub async fn submit_contact(
    State(state): State<AppState>,
    ContactPayload(form): ContactPayload,
) -> Result<Json<ContactResponse>, ApiError> {
    let submission = validate_contact(&form)?;

    let id = state
        .db
        .contacts()
        .insert(&submission)
        .await
        .map_err(ApiError::database(CONTACT_FAILED))?;

    info!(id = id, "Contact form submitted");

    Ok(Json(ContactResponse {
        success: true,
        message: CONTACT_SUBMITTED,
        id,
    }))
}
