//! Checkout module.
//!
//! Contains the customer/billing types and their validation, the order
//! payload builder, the backend gateway contract, payment error
//! classification, and the flow orchestrator.

mod customer;
mod flow;
mod gateway;
mod order;
mod orchestrator;
mod payment;
mod validate;

pub use customer::{BillingAddress, CustomerInfo};
pub use flow::{CheckoutStep, FlowState};
pub use gateway::{
    CommerceGateway, ConfirmPaymentRequest, OrderCreated, PaymentConfirmed, PaymentIntentCreated,
    PaymentIntentRequest, PaymentStatusInfo, ProcessorBillingAddress, ProcessorCustomer,
};
pub use order::{
    CreateOrderRequest, OrderAddress, OrderLine, OrderStatus, OrderType, PaymentMethod,
    PaymentStatus, StatusUpdateRequest,
};
pub use orchestrator::{CheckoutOrchestrator, FlowHandles, RetrySchedule};
pub use payment::{
    classify_confirmation_error, user_message_for, FailureKind, ProcessorErrorCode,
};
pub use validate::{
    is_valid_email, is_valid_emirates_id, normalize_uae_phone, validate_billing_address,
    validate_billing_address_with, validate_customer, ValidationErrors, UAE_CITIES, UAE_EMIRATES,
};
