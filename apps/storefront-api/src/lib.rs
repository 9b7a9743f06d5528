//! # Storefront API
//!
//! HTTP backend for the storefront: serves the catalog and stores contact
//! form submissions. The cart itself lives in the browser (see
//! `storefront-cart`); the API only supplies the products that go into it.
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path             Handler                     Errors            │
//! │  ──────  ────             ───────                     ──────            │
//! │  GET     /api/products    products::list_products     500               │
//! │  GET     /api/featured    products::featured_products 500               │
//! │  POST    /api/contact     contact::submit_contact     400, 500          │
//! │  POST    /api/insert      contact::submit_contact     400, 500          │
//! │  GET     /health          health::health              -                 │
//! │  *       (anything else)  routes::not_found           404               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error body is `{ "success": false, "error": "..." }`.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use storefront_db::Database;

pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the full router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/api/products", get(routes::products::list_products))
        .route("/api/featured", get(routes::products::featured_products))
        .route("/api/contact", post(routes::contact::submit_contact))
        .route("/api/insert", post(routes::contact::submit_contact))
        .route("/health", get(routes::health::health))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the configured origins, with credentials allowed.
///
/// Origins that are not valid header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
