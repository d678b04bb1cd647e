//! Shopping cart module.
//!
//! Contains the persisted cart store, line items, quantity caps, and the
//! typed events the store emits toward the UI layer.

mod events;
mod item;
mod store;

pub use events::{notice_for, CartEvent, EventSink, MemorySink, NullSink};
pub use item::{max_allowed_for_stock, CartLineItem, LimitReason, GLOBAL_MAX_PER_PRODUCT};
pub use store::{CartState, CartStore, CART_STORAGE_KEY};
