//! # Cart Persistence Adapter
//!
//! Moves a `CartState` in and out of a slot store.
//!
//! ## Load Path
//! ```text
//! slot.get("cart")
//!      │
//!      ├── Err(_)              ──► warn!, empty cart
//!      ├── Ok(None)            ──► empty cart (first visit)
//!      ▼
//! serde_json → CartSnapshot
//!      │
//!      ├── Err(_)              ──► warn!, empty cart
//!      ▼
//! CartState::restore  (recompute count + total, drop qty < 1, merge dups)
//!      │
//!      ▼
//! Loaded { state, needs_rewrite }
//! ```
//!
//! ## Save Path
//! The whole state is encoded as one JSON blob and written over the old one.
//! A failed write is logged and dropped; the in-memory cart is never rolled
//! back.

use tracing::{debug, info, warn};

use storefront_core::{CartSnapshot, CartState, RestoreReport};

use crate::error::StorageResult;
use crate::slot::{AsyncSlotStore, SlotStore};

// =============================================================================
// Encoding
// =============================================================================

/// Encodes the full state as the persisted JSON blob.
pub fn encode(state: &CartState) -> StorageResult<Vec<u8>> {
    Ok(serde_json::to_vec(state)?)
}

/// Decodes and repairs a persisted blob.
pub fn decode(bytes: &[u8]) -> StorageResult<(CartState, RestoreReport)> {
    let snapshot: CartSnapshot = serde_json::from_slice(bytes)?;
    Ok(CartState::restore(snapshot))
}

/// Result of a load: the state to install and whether the stored blob
/// should be replaced by the repaired one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Loaded {
    pub state: CartState,
    pub needs_rewrite: bool,
}

impl Loaded {
    fn empty() -> Self {
        Loaded::default()
    }
}

/// Turns the outcome of a slot read into a state. Never fails.
pub(crate) fn restore_from(key: &str, read: StorageResult<Option<Vec<u8>>>) -> Loaded {
    let bytes = match read {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!(key = %key, "No stored cart, starting empty");
            return Loaded::empty();
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read stored cart, starting empty");
            return Loaded::empty();
        }
    };

    let (state, report) = match decode(&bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(key = %key, error = %e, "Stored cart is malformed, starting empty");
            return Loaded::empty();
        }
    };

    if let Some((stored, recomputed)) = report.total_mismatch {
        warn!(
            key = %key,
            stored = %stored,
            recomputed = %recomputed,
            "Stored cart total disagrees with its items, using recomputed total"
        );
    }
    if report.dropped_items > 0 || report.merged_duplicates > 0 {
        warn!(
            key = %key,
            dropped = report.dropped_items,
            merged = report.merged_duplicates,
            "Repaired invalid cart entries"
        );
    }

    info!(
        key = %key,
        items = state.items().len(),
        item_count = state.item_count(),
        total = %state.total(),
        "Cart restored"
    );

    Loaded {
        state,
        needs_rewrite: report.needs_rewrite(),
    }
}

// =============================================================================
// Synchronous Adapter
// =============================================================================

/// Load/save adapter over a synchronous [`SlotStore`].
///
/// ## Example
/// ```rust
/// use storefront_cart::{CartPersistence, MemorySlots};
/// use storefront_core::{CartState, LineItem, Transition};
///
/// let persistence = CartPersistence::new(MemorySlots::new(), "cart");
/// let mut state = CartState::new();
/// state.apply(Transition::Add(LineItem::new(1, "Mug", "$10.00")));
/// persistence.save(&state);
///
/// assert_eq!(persistence.load().state, state);
/// ```
#[derive(Debug, Clone)]
pub struct CartPersistence<S> {
    store: S,
    key: String,
}

impl<S: SlotStore> CartPersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        CartPersistence {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads and restores the stored cart. Absent or corrupt → empty.
    pub fn load(&self) -> Loaded {
        restore_from(&self.key, self.store.get(&self.key))
    }

    /// Writes the full state. Failures are logged, not returned.
    pub fn save(&self, state: &CartState) {
        if let Err(e) = self.try_save(state) {
            warn!(key = %self.key, error = %e, "Failed to save cart");
        }
    }

    /// Writes the full state, surfacing the error.
    pub fn try_save(&self, state: &CartState) -> StorageResult<()> {
        let bytes = encode(state)?;
        self.store.set(&self.key, &bytes)?;
        debug!(key = %self.key, bytes = bytes.len(), "Cart saved");
        Ok(())
    }
}

// =============================================================================
// Asynchronous Load
// =============================================================================

/// Reads and restores the cart stored under `key` in an async store.
pub async fn load_async<S>(store: &S, key: &str) -> Loaded
where
    S: AsyncSlotStore + ?Sized,
{
    restore_from(key, store.get(key).await)
}

// =============================================================================
// Unit Tests
// =============================================================================
