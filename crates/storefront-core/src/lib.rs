//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart state
//! machine, price normalization, and input validation as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser client                               │   │
//! │  │    Catalog page ──► Add to cart ──► Cart page ──► Contact form  │   │
//! │  └─────────────┬───────────────────────────────┬───────────────────┘   │
//! │                │ HTTP (JSON)                   │ CartStore              │
//! │  ┌─────────────▼─────────────┐   ┌─────────────▼───────────────────┐   │
//! │  │   storefront-api (axum)   │   │   storefront-cart               │   │
//! │  │   products, contact       │   │   facade + persistence adapter  │   │
//! │  └─────────────┬─────────────┘   └─────────────┬───────────────────┘   │
//! │                │                               │                        │
//! │  ┌─────────────▼───────────────────────────────▼───────────────────┐   │
//! │  │               ★ storefront-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ CartState │  │  contact  │  │   │
//! │  │   │ Catalog.. │  │   Price   │  │Transition │  │  product  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront-db (Database Layer)                  │   │
//! │  │       SQLite queries, migrations, repositories, cart slots      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, CatalogProduct, ContactForm, etc.)
//! - [`money`] - Money type with integer cents
//! - [`price`] - Raw prices and their normalization into Money
//! - [`cart`] - Cart state, transitions, restore and summary
//! - [`error`] - Domain error types
//! - [`validation`] - Contact form and catalog validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartState, ItemId, LineItem, Transition};
//!
//! let mut cart = CartState::new();
//! cart.apply(Transition::Add(LineItem::new(1, "Mug", "$10.00")));
//! cart.apply(Transition::Add(LineItem::new(1, "Mug", "$10.00")));
//! cart.apply(Transition::SetQuantity { id: ItemId::Int(1), quantity: 5 });
//!
//! assert_eq!(cart.item_count(), 5);
//! assert_eq!(cart.total().to_string(), "$50.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod price;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{
    reduce, CartSnapshot, CartState, CartSummary, RestoreReport, SummaryLine, Transition,
    MAX_QUANTITY,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use price::{Price, MAX_UNIT_PRICE};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Slot key the cart is persisted under.
///
/// Existing browser carts live under this key, so it must not change.
pub const CART_STORAGE_KEY: &str = "cart";

/// URL prefix for catalog images.
pub const PRODUCT_IMAGE_ROOT: &str = "/productImages/";

/// Image shown for products without an `imgPath`.
pub const DEFAULT_PRODUCT_IMAGE: &str = "/productImages/default.png";

/// Number of products returned by the featured endpoint.
pub const DEFAULT_FEATURED_LIMIT: u32 = 5;
