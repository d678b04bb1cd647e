//! Cart and checkout core for the Paws storefront.
//!
//! This crate holds the storefront's only real business logic:
//!
//! - **Cart**: persisted line items with promotion-aware pricing and
//!   per-product quantity caps, emitting typed events toward the UI.
//! - **Pricing**: pure total calculations (subtotal, savings, VAT, grand
//!   total), reused by the cart, order payloads, and the buy-now path.
//! - **Checkout**: the order -> payment-intent -> confirmation flow with
//!   bounded retry, duplicate-submission guard, failure classification,
//!   and best-effort order cancellation, plus cash on delivery.
//!
//! The backend is reached through the [`checkout::CommerceGateway`] port;
//! the HTTP adapter lives in `paws-api`. Durable cart storage goes
//! through `paws-storage`.
//!
//! # Example
//!
//! ```rust,ignore
//! use paws_commerce::prelude::*;
//! use paws_storage::FileStore;
//!
//! let storage = FileStore::open("./state")?;
//! let mut cart = CartStore::open(storage, Box::new(NullSink));
//! cart.add_item(&record, 2);
//! println!("Total: {}", cart.grand_total());
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;
pub mod notify;
pub mod pricing;

pub use error::{CheckoutError, GatewayError};
pub use ids::{OrderId, PaymentIntentId, ProductId};
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CheckoutError, GatewayError};
    pub use crate::ids::{OrderId, PaymentIntentId, ProductId};
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{CatalogKind, CatalogRecord, Promotion};

    // Cart
    pub use crate::cart::{
        notice_for, CartEvent, CartLineItem, CartState, CartStore, EventSink, LimitReason,
        MemorySink, NullSink, GLOBAL_MAX_PER_PRODUCT,
    };

    // Pricing
    pub use crate::pricing::{order_summary, OrderSummary, OrderTotals, PricedItem};

    // Checkout
    pub use crate::checkout::{
        BillingAddress, CheckoutOrchestrator, CheckoutStep, CommerceGateway, CreateOrderRequest,
        CustomerInfo, FailureKind, FlowHandles, FlowState, OrderStatus, PaymentMethod,
        RetrySchedule, StatusUpdateRequest,
    };

    // Notifications
    pub use crate::notify::{LogSink, Notice, NoticeKind, NoticeSink};
}
