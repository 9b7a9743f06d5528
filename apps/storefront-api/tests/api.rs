//! Router tests against an in-memory database.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use storefront_api::{build_router, ApiConfig, AppState};
use storefront_db::{seed_demo_catalog, Database, DbConfig};

async fn test_app(seed: bool) -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    if seed {
        seed_demo_catalog(&db).await.unwrap();
    }

    let config = ApiConfig {
        featured_limit: 3,
        ..ApiConfig::default()
    };

    (build_router(AppState::new(db.clone(), config)), db)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_list_products() {
    let (app, _db) = test_app(true).await;

    let (status, body) = send(&app, get("/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 10);
    assert_eq!(products[0]["id"], 1);
    assert_eq!(products[0]["productName"], "Ceramic Mug");
    assert_eq!(products[0]["imgPath"], "mug.png");
    assert_eq!(products[0]["productPrice"], "12.99");

    let ids: Vec<i64> = products.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn test_empty_catalog() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(&app, get("/api/products")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], json!([]));
}

#[tokio::test]
async fn test_featured_respects_limit() {
    let (app, _db) = test_app(true).await;

    let (status, body) = send(&app, get("/api/featured")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 3);

    let mut ids: Vec<i64> = products.iter().map(|p| p["id"].as_i64().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_database_failure_is_a_500_with_fixed_message() {
    let (app, db) = test_app(true).await;
    db.close().await;

    let (status, body) = send(&app, get("/api/products")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Failed to fetch products. Please try again later."
        })
    );

    let (status, body) = send(&app, get("/api/featured")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Failed to fetch featured products. Please try again later."
    );
}

// =============================================================================
// Contact
// =============================================================================

#[tokio::test]
async fn test_contact_json() {
    let (app, db) = test_app(false).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/contact",
            json!({
                "first_name": " Ada ",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "message": "Do you ship abroad?"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact form submitted successfully!");

    let id = body["id"].as_i64().unwrap();
    let stored = db.contacts().get_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Ada");
    assert_eq!(stored.message, "Do you ship abroad?");
}

#[tokio::test]
async fn test_contact_form_with_widget_field_names() {
    let (app, db) = test_app(false).await;

    let (status, body) = send(
        &app,
        post_form(
            "/api/insert",
            "firstname=Grace&lastname=Hopper&email=grace%40example.com&subject=Bulk+order",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["success"], true);

    let stored = db
        .contacts()
        .get_by_id(body["id"].as_i64().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.last_name, "Hopper");
    assert_eq!(stored.email, "grace@example.com");
    assert_eq!(stored.message, "Bulk order");
}

#[tokio::test]
async fn test_contact_missing_fields() {
    let (app, db) = test_app(false).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/contact",
            json!({ "first_name": "Ada", "email": "ada@example.com", "message": "hi" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Missing required fields. Please provide first name, last name, email, and message."
        })
    );
    assert_eq!(db.contacts().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_contact_invalid_email() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/contact",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada at example dot com",
                "message": "hi"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format.");
}

#[tokio::test]
async fn test_contact_malformed_json() {
    let (app, _db) = test_app(false).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"first_name\":"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_contact_database_failure() {
    let (app, db) = test_app(false).await;
    db.close().await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/contact",
            json!({
                "first_name": "Ada",
                "last_name": "Lovelace",
                "email": "ada@example.com",
                "message": "hi"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Failed to submit contact form. Please try again later."
    );
}

// =============================================================================
// Health, Fallback, CORS
// =============================================================================

#[tokio::test]
async fn test_health() {
    let (app, db) = test_app(false).await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "database": true }));

    db.close().await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], false);
}

#[tokio::test]
async fn test_unknown_route() {
    let (app, _db) = test_app(false).await;

    let (status, body) = send(&app, get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Route not found" }));
}

fn preflight(origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_cors_allows_configured_origin_with_credentials() {
    let (app, _db) = test_app(false).await;

    let response = app.oneshot(preflight("http://localhost:3000")).await.unwrap();
    let headers = response.headers();

    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_rejects_other_origins() {
    let (app, _db) = test_app(false).await;

    let response = app.oneshot(preflight("https://evil.example")).await.unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
