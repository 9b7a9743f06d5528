//! # Cart Reducer
//!
//! The cart is a small state machine: a `CartState` plus a closed set of
//! `Transition`s, each of which is a total function from one state to the
//! next. Nothing here can fail. Invalid payloads (unknown id, bad price)
//! degrade to a no-op or a zero price.
//!
//! ## Transition Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Transition              Found id                 Unknown id            │
//! │  ──────────              ────────                 ──────────            │
//! │  Add(item)               qty += 1                 push, qty = 1         │
//! │                          count += 1               count += 1            │
//! │                          total += unit            total += unit         │
//! │                                                                         │
//! │  Remove(id)              drop entry               (no-op)               │
//! │                          count -= qty                                   │
//! │                          total -= unit × qty                            │
//! │                                                                         │
//! │  SetQuantity(id, n ≤ 0)  same as Remove           (no-op)               │
//! │  SetQuantity(id, n > 0)  qty = min(n, MAX)        (no-op)               │
//! │                          count += qty - old                             │
//! │                          total += unit × (qty-old)                      │
//! │                                                                         │
//! │  Clear                   → empty                                        │
//! │  Load(state)             → state                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bounds
//! A line holds at most [`MAX_QUANTITY`] units and unit prices are capped at
//! [`crate::price::MAX_UNIT_PRICE`]. `Add` on a full line is a no-op, and so
//! is any `Add` or `SetQuantity` whose new count or total would not fit in
//! an `i64`. Counts and totals are only ever updated with checked
//! arithmetic.
//!
//! ## Invariants (checked after every transition in debug builds)
//! - `item_count == Σ quantity`
//! - `total == Σ unit_price × quantity`, exactly, because totals are integer
//!   micro-units and never drift
//! - ids are unique; every quantity is in `1..=MAX_QUANTITY`
//!
//! ## Persisted Shape
//! ```json
//! { "items": [{ "id": 1, "name": "Mug", "price": "$10.00", "quantity": 2, ... }],
//!   "itemCount": 2,
//!   "total": 20.0 }
//! ```
//! Deserializing always goes through [`CartState::restore`], so counts and
//! totals are recomputed from the items and a legacy blob without `total`
//! comes back repaired.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::money::Money;
use crate::price::Price;
use crate::types::{ItemId, ItemRef, LineItem};

/// Most units a single cart line can hold.
pub const MAX_QUANTITY: i64 = 10_000;

// =============================================================================
// Transitions
// =============================================================================

/// Every way a cart can change.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Add one unit. The candidate's own quantity is ignored.
    Add(LineItem),
    /// Remove the whole entry, whatever its quantity.
    Remove(ItemId),
    /// Replace the quantity; `quantity <= 0` removes, anything above
    /// [`MAX_QUANTITY`] is clamped to it.
    SetQuantity { id: ItemId, quantity: i64 },
    /// Reset to the empty cart.
    Clear,
    /// Replace the state with one restored from storage.
    Load(CartState),
}

impl Transition {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Transition::Add(_) => "add",
            Transition::Remove(_) => "remove",
            Transition::SetQuantity { .. } => "set_quantity",
            Transition::Clear => "clear",
            Transition::Load(_) => "load",
        }
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The observable and persisted cart.
///
/// Fields are private: the only way to change a `CartState` is a
/// [`Transition`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CartState {
    items: Vec<LineItem>,
    item_count: i64,
    total: Money,
}

impl CartState {
    /// The canonical empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> i64 {
        self.item_count
    }

    /// Running total. O(1); kept in sync incrementally.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a line by id.
    pub fn get(&self, id: impl ItemRef) -> Option<&LineItem> {
        let id = id.item_id();
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Total computed from scratch.
    pub fn recomputed_total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Checks every invariant listed in the module docs.
    pub fn is_consistent(&self) -> bool {
        let count = self
            .items
            .iter()
            .try_fold(0_i64, |acc, item| acc.checked_add(item.quantity));
        let unique = self
            .items
            .iter()
            .enumerate()
            .all(|(i, item)| self.items[..i].iter().all(|earlier| earlier.id != item.id));

        count == Some(self.item_count)
            && self.recomputed_total() == self.total
            && unique
            && self
                .items
                .iter()
                .all(|item| (1..=MAX_QUANTITY).contains(&item.quantity))
    }

    // =========================================================================
    // Reducer
    // =========================================================================

    /// Applies a transition in place.
    ///
    /// ## Returns
    /// `true` if the state changed (the caller should persist it),
    /// `false` for a no-op.
    pub fn apply(&mut self, transition: Transition) -> bool {
        let changed = match transition {
            Transition::Add(candidate) => self.add(candidate),
            Transition::Remove(id) => self.remove(&id),
            Transition::SetQuantity { id, quantity } => self.set_quantity(&id, quantity),
            Transition::Clear => {
                let changed = !self.is_empty();
                *self = CartState::new();
                changed
            }
            Transition::Load(state) => {
                *self = state;
                true
            }
        };

        debug_assert!(self.is_consistent(), "cart invariants violated: {self:?}");
        changed
    }

    fn add(&mut self, candidate: LineItem) -> bool {
        let Some(item_count) = self.item_count.checked_add(1) else {
            return false;
        };

        match self.position(&candidate.id) {
            Some(index) => {
                let item = &mut self.items[index];
                if item.quantity >= MAX_QUANTITY {
                    return false;
                }
                let Some(total) = self.total.checked_add(item.unit_price()) else {
                    return false;
                };
                item.quantity += 1;
                self.total = total;
            }
            None => {
                let item = LineItem {
                    quantity: 1,
                    ..candidate
                };
                let Some(total) = self.total.checked_add(item.unit_price()) else {
                    return false;
                };
                self.total = total;
                self.items.push(item);
            }
        }

        self.item_count = item_count;
        true
    }

    fn remove(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        let item = self.items.remove(index);
        self.item_count -= item.quantity;
        self.total -= item.line_total();
        true
    }

    fn set_quantity(&mut self, id: &ItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }

        let Some(index) = self.position(id) else {
            return false;
        };

        let quantity = quantity.min(MAX_QUANTITY);
        let item = &mut self.items[index];
        // both sides are in 1..=MAX_QUANTITY
        let delta = quantity - item.quantity;
        if delta == 0 {
            return false;
        }

        let Some(item_count) = self.item_count.checked_add(delta) else {
            return false;
        };
        let Some(total) = item
            .unit_price()
            .checked_mul(delta)
            .and_then(|change| self.total.checked_add(change))
        else {
            return false;
        };

        item.quantity = quantity;
        self.item_count = item_count;
        self.total = total;
        true
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Rebuilds a state from a decoded snapshot, repairing what it can.
    ///
    /// ## Repairs
    /// - entries with quantity outside `1..=MAX_QUANTITY` are dropped
    /// - duplicate ids are merged into the first occurrence, capped at
    ///   `MAX_QUANTITY`
    /// - entries that would push the count or total past `i64` are dropped
    /// - `itemCount` and `total` are recomputed from the items; a snapshot
    ///   without `total` (older clients never stored it) is expected, and a
    ///   stored value that disagrees is reported
    pub fn restore(snapshot: CartSnapshot) -> (CartState, RestoreReport) {
        let mut report = RestoreReport {
            legacy_total: snapshot.total.is_none(),
            ..RestoreReport::default()
        };

        let mut merged: Vec<LineItem> = Vec::with_capacity(snapshot.items.len());
        for item in snapshot.items {
            if !(1..=MAX_QUANTITY).contains(&item.quantity) {
                report.dropped_items += 1;
                continue;
            }
            match merged.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => {
                    existing.quantity = (existing.quantity + item.quantity).min(MAX_QUANTITY);
                    report.merged_duplicates += 1;
                }
                None => merged.push(item),
            }
        }

        let mut state = CartState::new();
        for item in merged {
            let next = state
                .item_count
                .checked_add(item.quantity)
                .zip(state.total.checked_add(item.line_total()));
            match next {
                Some((item_count, total)) => {
                    state.item_count = item_count;
                    state.total = total;
                    state.items.push(item);
                }
                None => report.dropped_items += 1,
            }
        }

        if let Some(stored) = snapshot.item_count {
            report.count_mismatch = stored != state.item_count;
        }
        if let Some(stored) = snapshot.total {
            let stored = stored.amount();
            if stored != state.total {
                report.total_mismatch = Some((stored, state.total));
            }
        }

        (state, report)
    }

    /// Derived read model for views.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self
                .items
                .iter()
                .map(|item| SummaryLine {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    description: item.description.clone(),
                    image: item.image.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price().to_decimal(),
                    line_total: item.line_total().to_decimal(),
                })
                .collect(),
            item_count: self.item_count,
            total: self.total.to_decimal(),
            total_display: self.total.to_string(),
            is_empty: self.is_empty(),
        }
    }
}

/// Pure form of [`CartState::apply`].
///
/// ## Example
/// ```rust
/// use storefront_core::cart::{reduce, CartState, Transition};
/// use storefront_core::LineItem;
///
/// let state = reduce(CartState::new(), Transition::Add(LineItem::new(1, "Mug", "$10.00")));
/// let state = reduce(state, Transition::Add(LineItem::new(1, "Mug", "$10.00")));
/// assert_eq!(state.item_count(), 2);
/// assert_eq!(state.total().cents(), 2000);
/// ```
pub fn reduce(mut state: CartState, transition: Transition) -> CartState {
    state.apply(transition);
    state
}

// =============================================================================
// Persisted Shape
// =============================================================================

/// A cart blob as decoded, before any repair.
///
/// `itemCount` and `total` are optional: carts written by older clients
/// only carried `items` and `itemCount`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub item_count: Option<i64>,

    #[serde(default)]
    pub total: Option<Price>,
}

/// What [`CartState::restore`] had to fix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// The snapshot had no `total` field.
    pub legacy_total: bool,
    /// Stored `itemCount` disagreed with the items.
    pub count_mismatch: bool,
    /// `(stored, recomputed)` when the stored total was wrong.
    pub total_mismatch: Option<(Money, Money)>,
    /// Entries dropped for a quantity outside `1..=MAX_QUANTITY`, or
    /// because keeping them would overflow the count or total.
    pub dropped_items: usize,
    /// Entries folded into an earlier entry with the same id.
    pub merged_duplicates: usize,
}

impl RestoreReport {
    /// True when the stored blob differs from what `save` would write.
    pub fn needs_rewrite(&self) -> bool {
        self.legacy_total
            || self.count_mismatch
            || self.total_mismatch.is_some()
            || self.dropped_items > 0
            || self.merged_duplicates > 0
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartStateRef<'a> {
    items: &'a [LineItem],
    item_count: i64,
    total: f64,
}

impl Serialize for CartState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CartStateRef {
            items: &self.items,
            item_count: self.item_count,
            total: self.total.to_decimal(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CartState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = CartSnapshot::deserialize(deserializer)?;
        Ok(CartState::restore(snapshot).0)
    }
}

// =============================================================================
// Summary (view model)
// =============================================================================

/// One row of [`CartSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SummaryLine {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// What the cart page renders.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub items: Vec<SummaryLine>,
    pub item_count: i64,
    pub total: f64,
    /// `"$20.00"`
    pub total_display: String,
    pub is_empty: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
