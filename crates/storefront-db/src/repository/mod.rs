//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler / cart adapter                                            │
//! │       │                                                                 │
//! │       │  db.products().featured(5)                                      │
//! │       ▼                                                                 │
//! │  ProductRepository      ContactRepository      CartSlotRepository       │
//! │  ├── list_all           ├── insert             ├── get                  │
//! │  ├── featured           ├── get_by_id          └── set                  │
//! │  ├── insert             └── count                                       │
//! │  └── count                                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hold a pool clone and nothing else, so they are cheap to
//! create per call.

pub mod cart_slot;
pub mod contact;
pub mod product;
