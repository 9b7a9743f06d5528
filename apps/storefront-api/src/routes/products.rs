//! Catalog reads.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::debug;

use storefront_core::CatalogProduct;

use crate::error::{ApiError, FEATURED_FAILED, PRODUCTS_FAILED};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub success: bool,
    pub products: Vec<CatalogProduct>,
}

impl ProductsResponse {
    fn ok(products: Vec<CatalogProduct>) -> Json<Self> {
        Json(ProductsResponse {
            success: true,
            products,
        })
    }
}

/// `GET /api/products`: the whole catalog in id order.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let products = state
        .db
        .products()
        .list_all()
        .await
        .map_err(ApiError::database(PRODUCTS_FAILED))?;

    debug!(count = products.len(), "Listed products");
    Ok(ProductsResponse::ok(products))
}

/// `GET /api/featured`: a random sample of the catalog.
pub async fn featured_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let limit = state.config.featured_limit;
    let products = state
        .db
        .products()
        .featured(limit)
        .await
        .map_err(ApiError::database(FEATURED_FAILED))?;

    debug!(count = products.len(), limit = limit, "Picked featured products");
    Ok(ProductsResponse::ok(products))
}
