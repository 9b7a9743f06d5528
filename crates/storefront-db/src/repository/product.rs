//! # Product Repository
//!
//! Read access to the catalog, plus inserts for seeding.
//!
//! ## Row Mapping
//! ```text
//! products row                         CatalogProduct (wire)
//! ────────────                         ─────────────────────
//! id                  INTEGER    ──►   id
//! img_path            TEXT NULL  ──►   imgPath
//! product_name        TEXT       ──►   productName
//! product_description TEXT       ──►   productDescription
//! product_price       TEXT       ──►   productPrice (Price::Text, as stored)
//! ```
//!
//! Prices are never normalized here; the cart does that when an item is
//! added.

use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use storefront_core::validation::validate_new_product;
use storefront_core::{CatalogProduct, NewProduct, Price};

/// A raw `products` row.
#[derive(Debug, Clone, FromRow)]
struct ProductRow {
    id: i64,
    img_path: Option<String>,
    product_name: String,
    product_description: String,
    product_price: String,
}

impl From<ProductRow> for CatalogProduct {
    fn from(row: ProductRow) -> Self {
        CatalogProduct {
            id: row.id,
            img_path: row.img_path,
            product_name: row.product_name,
            product_description: row.product_description,
            product_price: Price::Text(row.product_price),
        }
    }
}

/// Repository for catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let all = repo.list_all().await?;
/// let featured = repo.featured(5).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Returns every product, ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<CatalogProduct>> {
        debug!("Listing all products");

        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, img_path, product_name, product_description, product_price
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CatalogProduct::from).collect())
    }

    /// Returns up to `limit` products in random order.
    pub async fn featured(&self, limit: u32) -> DbResult<Vec<CatalogProduct>> {
        debug!(limit = %limit, "Sampling featured products");

        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, img_path, product_name, product_description, product_price
            FROM products
            ORDER BY RANDOM()
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CatalogProduct::from).collect())
    }

    /// Inserts a product and returns its id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<i64> {
        validate_new_product(product)?;

        debug!(name = %product.product_name, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (img_path, product_name, product_description, product_price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(product.img_path.as_deref())
        .bind(product.product_name.trim())
        .bind(&product.product_description)
        .bind(product.product_price.trim())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Counts catalog rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
