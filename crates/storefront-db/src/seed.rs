//! # Demo Catalog
//!
//! A small catalog for development and demos. Used by the `seed` binary and
//! by the API when started with `STOREFRONT_SEED=true`.

use tracing::{info, warn};

use crate::error::DbResult;
use crate::pool::Database;
use storefront_core::NewProduct;

/// `(image, name, description, price)`
const DEMO_CATALOG: &[(Option<&str>, &str, &str, &str)] = &[
    (Some("mug.png"), "Ceramic Mug", "350ml stoneware mug, dishwasher safe", "12.99"),
    (Some("tee.png"), "Logo Tee", "Heavyweight cotton t-shirt", "24.00"),
    (Some("tote.png"), "Canvas Tote", "Reinforced handles, fits a laptop", "18.50"),
    (Some("cap.png"), "Dad Cap", "Adjustable strap, embroidered logo", "21.00"),
    (Some("bottle.png"), "Steel Bottle", "Keeps drinks cold for 24 hours", "29.95"),
    (Some("notebook.png"), "Dot Notebook", "A5, 120 pages, lay-flat binding", "9.75"),
    (Some("stickers.png"), "Sticker Pack", "Six weatherproof vinyl stickers", "4.50"),
    (None, "Gift Card", "Redeemable on any order", "25.00"),
    (Some("hoodie.png"), "Zip Hoodie", "Brushed fleece lining", "54.00"),
    (Some("socks.png"), "Crew Socks", "Pack of two, one size", "11.00"),
];

/// Inserts the demo catalog unless products already exist.
///
/// ## Returns
/// The number of products inserted (0 when the catalog was not empty).
pub async fn seed_demo_catalog(db: &Database) -> DbResult<usize> {
    let existing = db.products().count().await?;
    if existing > 0 {
        info!(existing = existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let products = db.products();
    let mut inserted = 0;

    for (img_path, name, description, price) in DEMO_CATALOG {
        let product = NewProduct {
            img_path: img_path.map(str::to_string),
            product_name: name.to_string(),
            product_description: description.to_string(),
            product_price: price.to_string(),
        };

        match products.insert(&product).await {
            Ok(_) => inserted += 1,
            Err(e) => warn!(name = %name, error = %e, "Failed to insert demo product"),
        }
    }

    info!(inserted = inserted, "Demo catalog seeded");
    Ok(inserted)
}
