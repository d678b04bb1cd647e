//! The persisted cart store.
//!
//! Single writer, reducer-style: every mutation is applied synchronously
//! to the owned state and then written through to durable storage. A
//! failed write is logged and the store keeps working in memory.

use serde::{Deserialize, Serialize};
use tracing::warn;

use paws_storage::BlobStore;

use crate::cart::item::{limit_reason, max_allowed_for_stock};
use crate::cart::{CartEvent, CartLineItem, EventSink, GLOBAL_MAX_PER_PRODUCT};
use crate::catalog::CatalogRecord;
use crate::ids::ProductId;
use crate::money::Money;
use crate::pricing::{vat_rate, OrderTotals, PricedItem};

/// Storage key for the serialized cart blob.
pub const CART_STORAGE_KEY: &str = "pawsCart";

/// The serializable cart contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    /// Line items in insertion order, unique by product id.
    pub items: Vec<CartLineItem>,
}

/// The authoritative cart.
///
/// Owns [`CartState`] exclusively; nothing else writes it or the backing
/// storage key. Mutations emit [`CartEvent`]s through the injected sink.
pub struct CartStore<S: BlobStore> {
    state: CartState,
    storage: S,
    events: Box<dyn EventSink>,
}

impl<S: BlobStore> CartStore<S> {
    /// Open the cart, hydrating from storage.
    ///
    /// Missing or unreadable saved state degrades to an empty cart; it
    /// never fails startup.
    pub fn open(storage: S, events: Box<dyn EventSink>) -> Self {
        let state = match storage.get::<CartState>(CART_STORAGE_KEY) {
            Ok(Some(state)) => state,
            Ok(None) => CartState::default(),
            Err(e) => {
                warn!(error = %e, "failed to load saved cart, starting empty");
                CartState::default()
            }
        };
        Self {
            state,
            storage,
            events,
        }
    }

    /// Add `quantity` of a catalog record to the cart.
    ///
    /// Returns `false` without changing state when the request would cross
    /// the line's cap; the rejection reason is emitted as a
    /// [`CartEvent::LimitRejected`]. Price, promotion, and cap are captured
    /// from the record at add-time.
    pub fn add_item(&mut self, record: &CatalogRecord, quantity: u32) -> bool {
        if quantity == 0 {
            return false;
        }

        match self.state.items.iter().position(|i| i.id == record.id) {
            Some(idx) => {
                let line = &self.state.items[idx];
                let (current, max_allowed, stock) =
                    (line.quantity, line.max_allowed, line.stock_quantity);
                if current + quantity > max_allowed {
                    self.events.emit(CartEvent::LimitRejected {
                        id: record.id.clone(),
                        name: record.name.clone(),
                        reason: limit_reason(current, max_allowed, stock),
                    });
                    return false;
                }
                self.state.items[idx].quantity = current + quantity;
            }
            None => {
                let max_allowed = max_allowed_for_stock(record.stock_quantity);
                if quantity > max_allowed {
                    self.events.emit(CartEvent::LimitRejected {
                        id: record.id.clone(),
                        name: record.name.clone(),
                        reason: limit_reason(0, max_allowed, record.stock_quantity),
                    });
                    return false;
                }
                self.state
                    .items
                    .push(CartLineItem::from_record(record, quantity));
            }
        }

        self.persist();
        self.events.emit(CartEvent::ItemAdded {
            id: record.id.clone(),
            name: record.name.clone(),
        });
        true
    }

    /// Set a line's quantity.
    ///
    /// Zero removes the line entirely. A quantity above the line's cached
    /// cap is rejected without changing state. Returns `false` when the
    /// item is absent or the request was rejected.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id);
        }

        let Some(idx) = self.state.items.iter().position(|i| &i.id == id) else {
            return false;
        };

        let line = &self.state.items[idx];
        if quantity > line.max_allowed {
            self.events.emit(CartEvent::LimitRejected {
                id: id.clone(),
                name: line.name.clone(),
                reason: limit_reason(line.quantity, line.max_allowed, line.stock_quantity),
            });
            return false;
        }

        self.state.items[idx].quantity = quantity;
        self.persist();
        true
    }

    /// Remove a line. Removing an absent id is a no-op.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let Some(idx) = self.state.items.iter().position(|i| &i.id == id) else {
            return false;
        };
        let removed = self.state.items.remove(idx);
        self.persist();
        self.events.emit(CartEvent::ItemRemoved {
            id: removed.id,
            name: removed.name,
        });
        true
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.state.items.clear();
        self.persist();
        self.events.emit(CartEvent::CartCleared);
    }

    /// The current line items, in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.state.items
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.state.items.iter().map(|i| i.quantity).sum()
    }

    /// Full totals breakdown at the fixed VAT rate.
    pub fn totals(&self) -> OrderTotals {
        let priced: Vec<PricedItem> = self.state.items.iter().map(PricedItem::from).collect();
        OrderTotals::calculate(&priced, vat_rate())
    }

    pub fn subtotal(&self) -> Money {
        self.totals().subtotal
    }

    pub fn original_total(&self) -> Money {
        self.totals().original_total
    }

    pub fn total_savings(&self) -> Money {
        self.totals().savings
    }

    pub fn vat_amount(&self) -> Money {
        self.totals().vat_amount
    }

    pub fn grand_total(&self) -> Money {
        self.totals().total_amount
    }

    pub fn is_in_cart(&self, id: &ProductId) -> bool {
        self.state.items.iter().any(|i| &i.id == id)
    }

    /// Quantity of a line, or 0 when absent.
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        self.state
            .items
            .iter()
            .find(|i| &i.id == id)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }

    /// A line's cached cap, or the global cap when absent.
    pub fn max_allowed_for(&self, id: &ProductId) -> u32 {
        self.state
            .items
            .iter()
            .find(|i| &i.id == id)
            .map(|i| i.max_allowed)
            .unwrap_or(GLOBAL_MAX_PER_PRODUCT)
    }

    /// Whether at least one more unit of the product can be added.
    pub fn can_add_more(&self, id: &ProductId) -> bool {
        match self.state.items.iter().find(|i| &i.id == id) {
            Some(line) => line.quantity < line.max_allowed,
            None => true,
        }
    }

    /// A copy of the current state, e.g. for a checkout snapshot.
    pub fn snapshot(&self) -> CartState {
        self.state.clone()
    }

    fn persist(&self) {
        if let Err(e) = self.storage.set(CART_STORAGE_KEY, &self.state) {
            warn!(error = %e, "failed to persist cart, continuing in memory");
        }
    }
}
