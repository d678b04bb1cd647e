//! Typed cart events.
//!
//! Store mutations emit events instead of rendering toasts directly; the
//! UI-binding layer translates them (see [`notice_for`]) so the core stays
//! framework-agnostic and testable.

use std::sync::{Arc, Mutex};

use crate::cart::LimitReason;
use crate::ids::ProductId;
use crate::notify::Notice;

/// Something the cart did (or refused to do) that the user should see.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// An item was added or its quantity increased.
    ItemAdded { id: ProductId, name: String },
    /// An add or update was rejected by a quantity cap.
    LimitRejected {
        id: ProductId,
        name: String,
        reason: LimitReason,
    },
    /// An item was removed.
    ItemRemoved { id: ProductId, name: String },
    /// The cart was emptied.
    CartCleared,
}

/// Sink for cart events.
pub trait EventSink {
    fn emit(&self, event: CartEvent);
}

/// Sink that drops all events.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: CartEvent) {}
}

/// Sink that collects events in memory.
///
/// Clones share the same buffer, so a handle kept by the caller observes
/// events emitted through the sink given to the store.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<CartEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain all collected events.
    pub fn take(&self) -> Vec<CartEvent> {
        match self.events.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: CartEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Translate a cart event into the toast the storefront shows for it.
pub fn notice_for(event: &CartEvent) -> Notice {
    match event {
        CartEvent::ItemAdded { name, .. } => Notice::success(format!("{name} added to cart!")),
        CartEvent::LimitRejected { reason, .. } => Notice::warning(reason.user_message()),
        CartEvent::ItemRemoved { .. } => Notice::success("Item removed from cart"),
        CartEvent::CartCleared => Notice::success("Cart cleared"),
    }
}
