//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   to_line_item()   ┌─────────────────┐            │
//! │  │ CatalogProduct  │ ─────────────────► │    LineItem     │            │
//! │  │  ─────────────  │                    │  ─────────────  │            │
//! │  │  id (i64)       │                    │  id (ItemId)    │            │
//! │  │  imgPath        │                    │  image          │            │
//! │  │  productName    │                    │  name           │            │
//! │  │  productPrice   │                    │  price (Price)  │            │
//! │  └─────────────────┘                    │  quantity ≥ 1   │            │
//! │                                         └─────────────────┘            │
//! │                                                                         │
//! │  ┌─────────────────┐   validate_contact()   ┌───────────────────────┐  │
//! │  │  ContactForm    │ ─────────────────────► │  ContactSubmission    │  │
//! │  │  (raw, aliases) │                        │  (trimmed, checked)   │  │
//! │  └─────────────────┘                        └───────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Catalog rows keep the column names the browser client already consumes
//! (`imgPath`, `productName`, ...). Cart items use the short names the
//! client writes into its persisted cart (`image`, `name`, `price`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::price::Price;
use crate::{DEFAULT_PRODUCT_IMAGE, PRODUCT_IMAGE_ROOT};

// =============================================================================
// Item Identity
// =============================================================================

/// Identifier of a cart line.
///
/// Catalog ids are integers, but a restored cart may carry string ids.
/// `Int(1)` and `Text("1")` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum ItemId {
    Int(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(id) => write!(f, "{id}"),
            ItemId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        ItemId::Int(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        ItemId::Text(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        ItemId::Text(id)
    }
}

/// Anything that can name a cart line: an id, or a record that carries one.
///
/// Lets `remove_item` take either the item the view is rendering or a bare
/// id.
pub trait ItemRef {
    fn item_id(&self) -> ItemId;
}

impl ItemRef for ItemId {
    fn item_id(&self) -> ItemId {
        self.clone()
    }
}

impl ItemRef for i64 {
    fn item_id(&self) -> ItemId {
        ItemId::Int(*self)
    }
}

impl ItemRef for str {
    fn item_id(&self) -> ItemId {
        ItemId::Text(self.to_string())
    }
}

impl ItemRef for String {
    fn item_id(&self) -> ItemId {
        ItemId::Text(self.clone())
    }
}

impl ItemRef for LineItem {
    fn item_id(&self) -> ItemId {
        self.id.clone()
    }
}

impl ItemRef for CatalogProduct {
    fn item_id(&self) -> ItemId {
        ItemId::Int(self.id)
    }
}

impl<T: ItemRef + ?Sized> ItemRef for &T {
    fn item_id(&self) -> ItemId {
        (**self).item_id()
    }
}

// =============================================================================
// Line Item
// =============================================================================

fn default_quantity() -> i64 {
    1
}

/// One product entry in the cart.
///
/// ## Invariant
/// `quantity >= 1` while the item is held by a `CartState`. The reducer
/// removes the entry instead of letting quantity reach zero.
///
/// Descriptive fields default to empty so that a hand-edited or older cart
/// blob with missing fields still restores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: ItemId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Image URL or path.
    #[serde(default)]
    pub image: String,

    /// Unit price exactly as received. Use `unit_price()` for arithmetic.
    #[serde(default)]
    pub price: Price,

    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line candidate with quantity 1.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: impl Into<Price>) -> Self {
        LineItem {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            image: String::new(),
            price: price.into(),
            quantity: 1,
        }
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the image reference (builder style).
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Sets the quantity (builder style).
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Normalized unit price.
    #[inline]
    pub fn unit_price(&self) -> crate::Money {
        self.price.normalized()
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> crate::Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Catalog Product
// =============================================================================

/// A product row as served by `GET /api/products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogProduct {
    pub id: i64,

    /// File name under the product image root, if the product has one.
    pub img_path: Option<String>,

    pub product_name: String,

    pub product_description: String,

    pub product_price: Price,
}

impl CatalogProduct {
    /// Resolves the browser-facing image URL.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{CatalogProduct, Price};
    ///
    /// let mut product = CatalogProduct {
    ///     id: 1,
    ///     img_path: Some("mug.png".into()),
    ///     product_name: "Mug".into(),
    ///     product_description: "Ceramic".into(),
    ///     product_price: Price::from("$8.00"),
    /// };
    /// assert_eq!(product.image_url(), "/productImages/mug.png");
    ///
    /// product.img_path = None;
    /// assert_eq!(product.image_url(), "/productImages/default.png");
    /// ```
    pub fn image_url(&self) -> String {
        match self.img_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => format!("{PRODUCT_IMAGE_ROOT}{path}"),
            _ => DEFAULT_PRODUCT_IMAGE.to_string(),
        }
    }

    /// Builds the cart candidate for this product.
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            id: ItemId::Int(self.id),
            name: self.product_name.clone(),
            description: self.product_description.clone(),
            image: self.image_url(),
            price: self.product_price.clone(),
            quantity: 1,
        }
    }
}

impl From<&CatalogProduct> for LineItem {
    fn from(product: &CatalogProduct) -> Self {
        product.to_line_item()
    }
}

/// Input for inserting a catalog product (seeding, admin tooling).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub img_path: Option<String>,
    pub product_name: String,
    pub product_description: String,
    pub product_price: String,
}

// =============================================================================
// Contact Form
// =============================================================================

/// Contact form body as posted by the browser.
///
/// The form widget posts `firstname` / `lastname` / `subject`, older
/// clients post `first_name` / `last_name` / `message`. Both are accepted;
/// the snake_case field wins when both are present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl ContactForm {
    pub fn first_name(&self) -> &str {
        first_present(&self.first_name, &self.firstname)
    }

    pub fn last_name(&self) -> &str {
        first_present(&self.last_name, &self.lastname)
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        first_present(&self.message, &self.subject)
    }
}

/// First non-empty value, else "".
fn first_present<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> &'a str {
    primary
        .as_deref()
        .filter(|value| !value.is_empty())
        .or(fallback.as_deref())
        .unwrap_or_default()
}

/// A validated contact submission, ready to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

/// A stored contact submission.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mug() -> CatalogProduct {
        CatalogProduct {
            id: 7,
            img_path: Some("mug.png".to_string()),
            product_name: "Mug".to_string(),
            product_description: "Ceramic, 350ml".to_string(),
            product_price: Price::from("12.50"),
        }
    }

    #[test]
    fn test_item_id_kinds_are_distinct() {
        assert_ne!(ItemId::from(1), ItemId::from("1"));
        assert_eq!(ItemId::from(1), 1_i64.item_id());
    }

    #[test]
    fn test_item_id_untagged_serde() {
        let int: ItemId = serde_json::from_str("42").unwrap();
        assert_eq!(int, ItemId::Int(42));

        let text: ItemId = serde_json::from_str("\"sku-42\"").unwrap();
        assert_eq!(text, ItemId::Text("sku-42".to_string()));
    }

    #[test]
    fn test_catalog_product_to_line_item() {
        let item = mug().to_line_item();
        assert_eq!(item.id, ItemId::Int(7));
        assert_eq!(item.name, "Mug");
        assert_eq!(item.image, "/productImages/mug.png");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.unit_price().cents(), 1250);
    }

    #[test]
    fn test_blank_image_path_uses_default() {
        let mut product = mug();
        product.img_path = Some("  ".to_string());
        assert_eq!(product.image_url(), DEFAULT_PRODUCT_IMAGE);
    }

    #[test]
    fn test_catalog_wire_names() {
        let json = serde_json::to_value(mug()).unwrap();
        assert_eq!(json["imgPath"], "mug.png");
        assert_eq!(json["productName"], "Mug");
        assert_eq!(json["productPrice"], "12.50");
    }

    #[test]
    fn test_line_item_defaults_when_fields_missing() {
        let item: LineItem = serde_json::from_str(r#"{"id": 3, "price": "$4.00"}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert!(item.name.is_empty());
        assert_eq!(item.line_total().cents(), 400);
    }

    #[test]
    fn test_contact_form_accepts_aliases() {
        let form: ContactForm = serde_json::from_str(
            r#"{"firstname": "Ada", "lastname": "Lovelace", "email": "ada@example.com", "subject": "Hi"}"#,
        )
        .unwrap();
        assert_eq!(form.first_name(), "Ada");
        assert_eq!(form.last_name(), "Lovelace");
        assert_eq!(form.message(), "Hi");
    }

    #[test]
    fn test_contact_form_prefers_snake_case_when_non_empty() {
        let form: ContactForm = serde_json::from_str(
            r#"{"message": "", "subject": "From subject", "first_name": "A", "firstname": "B"}"#,
        )
        .unwrap();
        assert_eq!(form.message(), "From subject");
        assert_eq!(form.first_name(), "A");
        assert_eq!(form.email(), "");
    }
}
