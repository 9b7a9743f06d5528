//! # Cart Store
//!
//! The facade the client talks to. Owns one `CartState`, routes every
//! operation through the reducer, and persists after each change.
//!
//! ## Operation → Transition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore method              Transition                Saved?         │
//! │  ────────────────              ──────────                ──────         │
//! │  add_item(item)                Add(item)                 yes            │
//! │  remove_item(id | item)        Remove(id)                if found       │
//! │  set_quantity(id, n)           SetQuantity { id, n }     if changed     │
//! │  clear()                       Clear                     if non-empty   │
//! │  load(loaded)                  Load(state)               if repaired    │
//! │  total()                       (read only, O(1))         -              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Backends
//! - `CartStore<CartPersistence<S>>`: writes inline to a sync slot store
//! - `CartStore<SaveQueue>`: hands snapshots to a background writer
//! - `CartStore<Detached>`: never persists
//!
//! ## Example
//! ```rust
//! use storefront_cart::{CartPersistence, CartStore, MemorySlots};
//! use storefront_core::LineItem;
//!
//! let slots = MemorySlots::new();
//! let mut cart = CartStore::open(CartPersistence::new(slots.clone(), "cart"));
//! cart.add_item(LineItem::new(1, "Mug", "$10.00"));
//! cart.add_item(LineItem::new(1, "Mug", "$10.00"));
//! assert_eq!(cart.total().to_string(), "$20.00");
//!
//! // A second session sees the same cart.
//! let reopened = CartStore::open(CartPersistence::new(slots, "cart"));
//! assert_eq!(reopened.item_count(), 2);
//! ```

use std::sync::Arc;
use tracing::{debug, warn};

use storefront_core::{CartState, CartSummary, ItemRef, LineItem, Money, Transition};

use crate::persistence::{CartPersistence, Loaded};
use crate::queue::SaveQueue;
use crate::slot::{AsyncSlotStore, SlotStore};

// =============================================================================
// Save Hook
// =============================================================================

/// Called with the new state after every transition that changed it.
///
/// Implementations must not fail the caller: errors are logged.
pub trait SaveHook: Send + Sync {
    fn save(&self, state: &CartState);
}

impl<S: SlotStore> SaveHook for CartPersistence<S> {
    fn save(&self, state: &CartState) {
        CartPersistence::save(self, state);
    }
}

impl SaveHook for SaveQueue {
    fn save(&self, state: &CartState) {
        if let Err(e) = self.enqueue(state) {
            warn!(key = %self.key(), error = %e, "Failed to queue cart save");
        }
    }
}

/// A hook that never persists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl SaveHook for Detached {
    fn save(&self, _state: &CartState) {}
}

// =============================================================================
// Cart Store
// =============================================================================

/// Cart facade. See the module docs.
pub struct CartStore<H: SaveHook> {
    state: CartState,
    hook: H,
}

impl<H: SaveHook> CartStore<H> {
    /// Starts with an empty cart and does not read storage.
    pub fn with_hook(hook: H) -> Self {
        CartStore {
            state: CartState::new(),
            hook,
        }
    }

    /// Applies a transition and saves if it changed anything.
    pub fn dispatch(&mut self, transition: Transition) -> bool {
        let kind = transition.kind();
        let changed = self.state.apply(transition);

        debug!(
            transition = kind,
            changed = changed,
            item_count = self.state.item_count(),
            total = %self.state.total(),
            "Cart transition"
        );

        if changed {
            self.hook.save(&self.state);
        }
        changed
    }

    /// Adds one unit of `item`. Any quantity on the candidate is ignored.
    pub fn add_item(&mut self, item: impl Into<LineItem>) {
        self.dispatch(Transition::Add(item.into()));
    }

    /// Removes the whole line. Accepts an id or anything carrying one.
    pub fn remove_item(&mut self, item: impl ItemRef) -> bool {
        self.dispatch(Transition::Remove(item.item_id()))
    }

    /// Sets the quantity of an existing line; `quantity <= 0` removes it.
    pub fn set_quantity(&mut self, item: impl ItemRef, quantity: i64) -> bool {
        self.dispatch(Transition::SetQuantity {
            id: item.item_id(),
            quantity,
        })
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.dispatch(Transition::Clear);
    }

    /// Installs a loaded state, writing it back if it had to be repaired.
    pub fn load(&mut self, loaded: Loaded) {
        self.state.apply(Transition::Load(loaded.state));
        if loaded.needs_rewrite {
            debug!("Writing repaired cart back to storage");
            self.hook.save(&self.state);
        }
    }

    /// Running total.
    pub fn total(&self) -> Money {
        self.state.total()
    }

    pub fn item_count(&self) -> i64 {
        self.state.item_count()
    }

    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn summary(&self) -> CartSummary {
        self.state.summary()
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }
}

impl CartStore<Detached> {
    /// A cart that lives only in memory.
    pub fn detached() -> Self {
        CartStore::with_hook(Detached)
    }
}

impl<S: SlotStore> CartStore<CartPersistence<S>> {
    /// Opens the cart persisted in `persistence`.
    pub fn open(persistence: CartPersistence<S>) -> Self {
        let loaded = persistence.load();
        let mut store = CartStore::with_hook(persistence);
        store.load(loaded);
        store
    }

    /// Re-reads storage, replacing the in-memory cart.
    pub fn reload(&mut self) {
        let loaded = self.hook.load();
        self.load(loaded);
    }
}

impl CartStore<SaveQueue> {
    /// Opens the cart stored in an async backend and starts its writer.
    pub async fn open_async<S>(store: Arc<S>, key: impl Into<String>) -> Self
    where
        S: AsyncSlotStore + 'static,
    {
        let queue = SaveQueue::spawn(store, key);
        let loaded = queue.load().await;
        let mut cart = CartStore::with_hook(queue);
        cart.load(loaded);
        cart
    }

    /// Re-reads storage after pending writes land.
    pub async fn reload(&mut self) {
        let loaded = self.hook.load().await;
        self.load(loaded);
    }

    /// Waits for queued writes.
    pub async fn flush(&self) {
        if let Err(e) = self.hook.flush().await {
            warn!(error = %e, "Cart flush failed");
        }
    }

    /// Drains queued writes and stops the writer.
    pub async fn close(self) {
        if let Err(e) = self.hook.shutdown().await {
            warn!(error = %e, "Cart save queue shutdown failed");
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
