//! # storefront-cart: Cart Store and Persistence
//!
//! The cart facade and the adapters that keep a cart alive between
//! sessions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Client                                                                 │
//! │    add_item / remove_item / set_quantity / clear / total                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                storefront-cart (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   CartStore<H> ──► CartState::apply  (storefront-core)          │   │
//! │  │        │                                                        │   │
//! │  │        └── H: SaveHook                                          │   │
//! │  │              ├── CartPersistence<S: SlotStore>                  │   │
//! │  │              │      ├── MemorySlots                             │   │
//! │  │              │      └── FileSlots      (<data dir>/cart.json)   │   │
//! │  │              └── SaveQueue ──► S: AsyncSlotStore (tokio task)    │   │
//! │  │                     ├── MemorySlots                             │   │
//! │  │                     └── CartSlotRepository (storefront-db)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `CartStore` facade and `SaveHook`
//! - [`persistence`] - blob encode/decode, load/save adapter
//! - [`queue`] - background save queue for async backends
//! - [`slot`] - slot store traits and backends
//! - [`config`] - storage key and data directory
//! - [`error`] - storage errors (logged, never surfaced)

pub mod config;
pub mod error;
pub mod persistence;
pub mod queue;
pub mod slot;
pub mod store;

pub use config::CartConfig;
pub use error::{StorageError, StorageResult};
pub use persistence::{decode, encode, load_async, CartPersistence, Loaded};
pub use queue::SaveQueue;
pub use slot::{AsyncSlotStore, FileSlots, MemorySlots, SlotStore};
pub use store::{CartStore, Detached, SaveHook};
