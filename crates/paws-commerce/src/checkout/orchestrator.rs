//! Checkout orchestration.
//!
//! Sequences order creation, payment-intent creation, and payment
//! confirmation against the [`CommerceGateway`], with bounded retry of
//! transient failures on the two initial calls and a single best-effort
//! order cancellation when a payment is confirmed as failed. A parallel
//! cash-on-delivery path skips the payment steps entirely.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use paws_storage::BlobStore;

use crate::cart::CartStore;
use crate::checkout::payment::{classify_confirmation_error, user_message_for, FailureKind};
use crate::checkout::{
    validate_billing_address, validate_customer, BillingAddress, CheckoutStep,
    CommerceGateway, ConfirmPaymentRequest, CreateOrderRequest, CustomerInfo, FlowState,
    OrderStatus, PaymentIntentCreated, PaymentIntentRequest, PaymentMethod, PaymentStatusInfo,
    StatusUpdateRequest,
};
use crate::error::{CheckoutError, GatewayError};
use crate::ids::{OrderId, PaymentIntentId};
use crate::notify::{Notice, NoticeSink};

/// Bounded retry for transient failures of the initial flow calls.
///
/// Card-validation and confirmation-stage errors are never auto-retried.
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    /// Extra attempts after the first.
    pub extra_attempts: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            extra_attempts: 2,
            delay: Duration::from_millis(400),
        }
    }
}

/// What the UI needs to hand card collection to the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowHandles {
    pub order_id: OrderId,
    pub payment_intent_id: PaymentIntentId,
    pub client_secret: String,
}

/// Coordinates one checkout attempt at a time.
///
/// Holds the ephemeral [`FlowState`]; the cart is borrowed per call, with
/// the store remaining its only writer. Re-entrant calls while a step is
/// in flight are rejected with [`CheckoutError::Busy`].
pub struct CheckoutOrchestrator<G: CommerceGateway> {
    gateway: G,
    notices: Box<dyn NoticeSink>,
    retry: RetrySchedule,
    state: FlowState,
}

impl<G: CommerceGateway> CheckoutOrchestrator<G> {
    pub fn new(gateway: G, notices: Box<dyn NoticeSink>) -> Self {
        Self {
            gateway,
            notices,
            retry: RetrySchedule::default(),
            state: FlowState::new(),
        }
    }

    pub fn with_retry(mut self, retry: RetrySchedule) -> Self {
        self.retry = retry;
        self
    }

    /// The current flow state.
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// Abandon the current attempt and start fresh.
    ///
    /// A created-but-unpaid order is left for the backend to expire; the
    /// client only cancels on a confirmed payment failure.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Start the card-payment flow: create the order, then the payment
    /// intent.
    ///
    /// On success the returned handles carry the client secret the UI
    /// needs for card tokenization; the flow then waits for either
    /// [`confirm_payment_success`](Self::confirm_payment_success) or
    /// [`handle_payment_failure`](Self::handle_payment_failure).
    pub async fn start_payment_flow<S: BlobStore>(
        &mut self,
        cart: &CartStore<S>,
        customer: &CustomerInfo,
        billing: &BillingAddress,
    ) -> Result<FlowHandles, CheckoutError> {
        if self.state.in_flight {
            return Err(CheckoutError::Busy);
        }
        validate_inputs(customer, billing)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.state.reset();
        self.state.in_flight = true;

        let request =
            CreateOrderRequest::build(cart.items(), customer, billing, PaymentMethod::Stripe);

        let created =
            match retry_transient(&self.retry, || self.gateway.create_order(&request)).await {
                Ok(created) => created,
                Err(e) => {
                    error!(error = %e, "order creation failed");
                    self.state.fail(e.message());
                    self.notices
                        .notify(Notice::error("Failed to create order. Please try again."));
                    return Err(CheckoutError::OrderCreation(e.message().to_string()));
                }
            };

        info!(order_id = %created.order_id, "order created");
        self.state.order_id = Some(created.order_id.clone());
        self.state.step = CheckoutStep::Payment;

        let intent_request = PaymentIntentRequest {
            order_id: created.order_id.clone(),
            customer_info: customer.into(),
            billing_address: billing.into(),
        };

        let intent = match retry_transient(&self.retry, || {
            self.gateway.create_payment_intent(&intent_request)
        })
        .await
        {
            Ok(intent) => intent,
            Err(e) => {
                // The order stays in place: nothing has been charged and
                // the intent step is retryable from here.
                error!(order_id = %created.order_id, error = %e, "payment intent creation failed");
                self.state.fail(e.message());
                self.notices.notify(Notice::error(user_message_for(&e)));
                return Err(CheckoutError::PaymentIntent(e.message().to_string()));
            }
        };

        info!(
            order_id = %created.order_id,
            payment_intent_id = %intent.payment_intent_id,
            "payment intent created"
        );
        let PaymentIntentCreated {
            payment_intent_id,
            client_secret,
        } = intent;
        self.state.payment_intent_id = Some(payment_intent_id.clone());
        self.state.client_secret = Some(client_secret.clone());
        self.state.in_flight = false;

        Ok(FlowHandles {
            order_id: created.order_id,
            payment_intent_id,
            client_secret,
        })
    }

    /// Confirm the payment after the processor tokenized the card.
    ///
    /// Never auto-retried. A backend answer of "already confirmed" counts
    /// as success; any other failure is classified and routed through the
    /// failure handler, which cancels the order once.
    pub async fn confirm_payment_success<S: BlobStore>(
        &mut self,
        cart: &mut CartStore<S>,
        payment_method_id: &str,
    ) -> Result<OrderId, CheckoutError> {
        if self.state.in_flight {
            return Err(CheckoutError::Busy);
        }
        let Some(payment_intent_id) = self.state.payment_intent_id.clone() else {
            return Err(CheckoutError::MissingPaymentIntent);
        };
        if self.state.order_id.is_none() {
            return Err(CheckoutError::NotStarted);
        }

        self.state.in_flight = true;
        self.state.error = None;

        let request = ConfirmPaymentRequest {
            payment_intent_id,
            payment_method_id: payment_method_id.to_string(),
        };

        match self.gateway.confirm_payment(&request).await {
            Ok(_) => self.finish_success(cart),
            Err(e) => {
                let kind = classify_confirmation_error(e.message());
                if kind == FailureKind::AlreadyConfirmed {
                    info!("payment was already confirmed, treating as success");
                    return self.finish_success(cart);
                }
                let message = e.message().to_string();
                self.fail_payment(kind, &message).await;
                Err(CheckoutError::PaymentFailed { kind, message })
            }
        }
    }

    /// Report a payment failure observed outside the confirmation call,
    /// e.g. a card tokenization error from the processor's client library.
    ///
    /// Classifies the message, cancels the order (best effort), and
    /// records a reason-specific error without advancing the flow.
    pub async fn handle_payment_failure(&mut self, message: &str) -> FailureKind {
        let kind = classify_confirmation_error(message);
        self.fail_payment(kind, message).await;
        kind
    }

    /// Place a cash-on-delivery order: one order-creation call, no
    /// payment steps.
    pub async fn place_cash_order<S: BlobStore>(
        &mut self,
        cart: &mut CartStore<S>,
        customer: &CustomerInfo,
        billing: &BillingAddress,
    ) -> Result<OrderId, CheckoutError> {
        if self.state.in_flight {
            return Err(CheckoutError::Busy);
        }
        validate_inputs(customer, billing)?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.state.reset();
        self.state.in_flight = true;

        info!(
            customer = %customer.name,
            lines = cart.items().len(),
            "placing cash on delivery order"
        );
        let request = CreateOrderRequest::build(
            cart.items(),
            customer,
            billing,
            PaymentMethod::CashOnDelivery,
        );

        match retry_transient(&self.retry, || self.gateway.create_order(&request)).await {
            Ok(created) => {
                info!(order_id = %created.order_id, "cash on delivery order created");
                self.state.order_id = Some(created.order_id.clone());
                self.state.in_flight = false;
                cart.clear();
                self.notices.notify(Notice::success(format!(
                    "Order {} placed! Pay on delivery.",
                    created.order_id
                )));
                Ok(created.order_id)
            }
            Err(e) => {
                error!(error = %e, "cash on delivery order creation failed");
                self.state.fail(e.message());
                self.notices
                    .notify(Notice::error("Failed to create order. Please try again."));
                Err(CheckoutError::OrderCreation(e.message().to_string()))
            }
        }
    }

    /// Poll the payment status, off the happy path (network recovery).
    pub async fn check_payment_status(&self) -> Result<PaymentStatusInfo, CheckoutError> {
        let Some(payment_intent_id) = &self.state.payment_intent_id else {
            return Err(CheckoutError::MissingPaymentIntent);
        };
        self.gateway
            .payment_status(payment_intent_id)
            .await
            .map_err(|e| CheckoutError::Status(e.message().to_string()))
    }

    fn finish_success<S: BlobStore>(
        &mut self,
        cart: &mut CartStore<S>,
    ) -> Result<OrderId, CheckoutError> {
        self.state.step = CheckoutStep::Confirmation;
        self.state.in_flight = false;

        let Some(order_id) = self.state.order_id.clone() else {
            return Err(CheckoutError::NotStarted);
        };
        cart.clear();
        info!(order_id = %order_id, "payment confirmed");
        self.notices.notify(Notice::success(format!(
            "Payment successful! Order {order_id} confirmed."
        )));
        Ok(order_id)
    }

    /// Shared failure path: cancel the order once (best effort), record a
    /// reason-specific error, release the lock. `order_id` stays intact
    /// for manual retry or support lookup.
    async fn fail_payment(&mut self, kind: FailureKind, message: &str) {
        error!(order_id = ?self.state.order_id, %message, "payment failed");

        if let Some(order_id) = self.state.order_id.clone() {
            let request = StatusUpdateRequest {
                status: OrderStatus::Cancelled,
                remarks: format!("Payment failed: {message}"),
            };
            match self.gateway.update_order_status(&order_id, &request).await {
                Ok(()) => info!(order_id = %order_id, "order cancelled after payment failure"),
                // A secondary failure is logged but must not mask the
                // payment error shown to the user.
                Err(e) => {
                    error!(order_id = %order_id, error = %e, "failed to cancel order")
                }
            }
        }

        self.state.fail(kind.user_message());
        self.notices.notify(Notice::error(kind.user_message()));
    }
}

fn validate_inputs(
    customer: &CustomerInfo,
    billing: &BillingAddress,
) -> Result<(), CheckoutError> {
    let mut errors = validate_customer(customer);
    errors.merge(validate_billing_address(billing));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(CheckoutError::Validation(errors))
    }
}

/// Run a gateway call, retrying transient failures per the schedule.
async fn retry_transient<T, Fut>(
    schedule: &RetrySchedule,
    mut op: impl FnMut() -> Fut,
) -> Result<T, GatewayError>
where
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt < schedule.extra_attempts => {
                attempt += 1;
                warn!(attempt, error = %e, "transient backend error, retrying");
                tokio::time::sleep(schedule.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::NullSink;
    use crate::catalog::CatalogRecord;
    use crate::checkout::{OrderCreated, PaymentConfirmed};
    use crate::ids::{PaymentIntentId, ProductId};
    use crate::money::Money;
    use crate::notify::{MemoryNotices, NoticeKind};
    use async_trait::async_trait;
    use paws_storage::MemoryStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockGateway {
        calls: Mutex<Vec<&'static str>>,
        order_transient_failures: Mutex<u32>,
        order_reject: Option<String>,
        intent_transient_failures: Mutex<u32>,
        confirm_error: Option<String>,
        cancel_fails: bool,
    }

    impl MockGateway {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn count(&self, name: &str) -> usize {
            self.calls().iter().filter(|c| **c == name).count()
        }
    }

    #[async_trait]
    impl CommerceGateway for MockGateway {
        async fn create_order(
            &self,
            _request: &CreateOrderRequest,
        ) -> Result<OrderCreated, GatewayError> {
            self.calls.lock().unwrap().push("create_order");
            if let Some(message) = &self.order_reject {
                return Err(GatewayError::rejected(Some(400), message.clone()));
            }
            let mut failures = self.order_transient_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(GatewayError::transient("connection reset"));
            }
            Ok(OrderCreated {
                order_id: OrderId::new("ord_1"),
            })
        }

        async fn create_payment_intent(
            &self,
            request: &PaymentIntentRequest,
        ) -> Result<PaymentIntentCreated, GatewayError> {
            assert!(!request.order_id.is_empty());
            self.calls.lock().unwrap().push("create_payment_intent");
            let mut failures = self.intent_transient_failures.lock().unwrap();
            if *failures > 0 {
                *failures -= 1;
                return Err(GatewayError::transient("timed out"));
            }
            Ok(PaymentIntentCreated {
                payment_intent_id: PaymentIntentId::new("pi_1"),
                client_secret: "cs_1".to_string(),
            })
        }

        async fn confirm_payment(
            &self,
            request: &ConfirmPaymentRequest,
        ) -> Result<PaymentConfirmed, GatewayError> {
            assert!(!request.payment_intent_id.is_empty());
            self.calls.lock().unwrap().push("confirm_payment");
            match &self.confirm_error {
                Some(message) => Err(GatewayError::rejected(Some(402), message.clone())),
                None => Ok(PaymentConfirmed::default()),
            }
        }

        async fn update_order_status(
            &self,
            _order_id: &OrderId,
            request: &StatusUpdateRequest,
        ) -> Result<(), GatewayError> {
            assert_eq!(request.status, OrderStatus::Cancelled);
            self.calls.lock().unwrap().push("update_order_status");
            if self.cancel_fails {
                return Err(GatewayError::transient("unreachable"));
            }
            Ok(())
        }

        async fn payment_status(
            &self,
            _payment_intent_id: &PaymentIntentId,
        ) -> Result<PaymentStatusInfo, GatewayError> {
            self.calls.lock().unwrap().push("payment_status");
            Ok(PaymentStatusInfo {
                status: "succeeded".to_string(),
            })
        }
    }

    fn record(id: &str, price: i64) -> CatalogRecord {
        CatalogRecord {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            price: Money::from_major(price),
            promotion: None,
            stock_quantity: None,
            product_code: None,
            unit: None,
            category: None,
            sub_category: None,
            kind: Default::default(),
        }
    }

    fn cart_with_item() -> CartStore<MemoryStore> {
        let mut cart = CartStore::open(MemoryStore::new(), Box::new(NullSink));
        assert!(cart.add_item(&record("p1", 100), 2));
        cart
    }

    fn customer() -> CustomerInfo {
        CustomerInfo::new("Sara Khan", "sara@example.com", "+971501234567")
    }

    fn billing() -> BillingAddress {
        BillingAddress::new("12 Al Wasl Road", "Dubai", "Dubai")
    }

    fn orchestrator(gateway: MockGateway) -> (CheckoutOrchestrator<MockGateway>, MemoryNotices) {
        let notices = MemoryNotices::new();
        let orch = CheckoutOrchestrator::new(gateway, Box::new(notices.clone())).with_retry(
            RetrySchedule {
                extra_attempts: 2,
                delay: Duration::ZERO,
            },
        );
        (orch, notices)
    }

    #[tokio::test]
    async fn test_happy_path_orders_before_intent() {
        let cart = cart_with_item();
        let (mut orch, _notices) = orchestrator(MockGateway::default());

        let handles = orch
            .start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();

        assert_eq!(handles.order_id.as_str(), "ord_1");
        assert_eq!(handles.client_secret, "cs_1");
        // The payment intent is only ever requested after the order call
        // yielded an id.
        assert_eq!(
            orch.gateway.calls(),
            vec!["create_order", "create_payment_intent"]
        );
        assert_eq!(orch.state().step, CheckoutStep::Payment);
        assert!(!orch.state().in_flight);
    }

    #[tokio::test]
    async fn test_confirm_success_clears_cart() {
        let mut cart = cart_with_item();
        let (mut orch, notices) = orchestrator(MockGateway::default());

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        let order_id = orch
            .confirm_payment_success(&mut cart, "pm_123")
            .await
            .unwrap();

        assert_eq!(order_id.as_str(), "ord_1");
        assert!(cart.is_empty());
        assert_eq!(orch.state().step, CheckoutStep::Confirmation);
        assert_eq!(orch.gateway.count("update_order_status"), 0);

        let success = notices
            .take()
            .into_iter()
            .find(|n| n.kind == NoticeKind::Success)
            .expect("success notice");
        assert!(success.message.contains("ord_1"));
    }

    #[tokio::test]
    async fn test_confirmed_failure_cancels_order_once() {
        let mut cart = cart_with_item();
        let gateway = MockGateway {
            confirm_error: Some("payment_failed".to_string()),
            ..Default::default()
        };
        let (mut orch, _notices) = orchestrator(gateway);

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        let err = orch
            .confirm_payment_success(&mut cart, "pm_123")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::PaymentFailed {
                kind: FailureKind::PaymentFailed,
                ..
            }
        ));
        // Exactly one cancellation, cart untouched, order id kept for
        // support lookup.
        assert_eq!(orch.gateway.count("update_order_status"), 1);
        assert!(!cart.is_empty());
        assert!(orch.state().error.is_some());
        assert_eq!(orch.state().order_id.as_ref().unwrap().as_str(), "ord_1");
        assert_eq!(orch.state().step, CheckoutStep::Payment);
    }

    #[tokio::test]
    async fn test_already_confirmed_is_success() {
        let mut cart = cart_with_item();
        let gateway = MockGateway {
            confirm_error: Some("Payment has already been confirmed".to_string()),
            ..Default::default()
        };
        let (mut orch, _notices) = orchestrator(gateway);

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        let order_id = orch
            .confirm_payment_success(&mut cart, "pm_123")
            .await
            .unwrap();

        assert_eq!(order_id.as_str(), "ord_1");
        assert!(cart.is_empty());
        assert_eq!(orch.gateway.count("update_order_status"), 0);
    }

    #[tokio::test]
    async fn test_cancel_failure_does_not_mask_payment_error() {
        let mut cart = cart_with_item();
        let gateway = MockGateway {
            confirm_error: Some("insufficient funds".to_string()),
            cancel_fails: true,
            ..Default::default()
        };
        let (mut orch, _notices) = orchestrator(gateway);

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        let err = orch
            .confirm_payment_success(&mut cart, "pm_123")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::PaymentFailed {
                kind: FailureKind::InsufficientFunds,
                ..
            }
        ));
        assert_eq!(orch.gateway.count("update_order_status"), 1);
    }

    #[tokio::test]
    async fn test_transient_order_failure_is_retried() {
        let cart = cart_with_item();
        let gateway = MockGateway {
            order_transient_failures: Mutex::new(2),
            ..Default::default()
        };
        let (mut orch, _notices) = orchestrator(gateway);

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        assert_eq!(orch.gateway.count("create_order"), 3);
    }

    #[tokio::test]
    async fn test_retry_budget_is_bounded() {
        let cart = cart_with_item();
        let gateway = MockGateway {
            order_transient_failures: Mutex::new(5),
            ..Default::default()
        };
        let (mut orch, _notices) = orchestrator(gateway);

        let err = orch
            .start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::OrderCreation(_)));
        // First attempt plus two extras, then give up on the order step.
        assert_eq!(orch.gateway.count("create_order"), 3);
        assert_eq!(orch.gateway.count("create_payment_intent"), 0);
        assert_eq!(orch.state().step, CheckoutStep::Order);
        assert!(orch.state().error.is_some());
    }

    #[tokio::test]
    async fn test_rejected_order_is_not_retried() {
        let cart = cart_with_item();
        let gateway = MockGateway {
            order_reject: Some("invalid products".to_string()),
            ..Default::default()
        };
        let (mut orch, _notices) = orchestrator(gateway);

        let err = orch
            .start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::OrderCreation(_)));
        assert_eq!(orch.gateway.count("create_order"), 1);
    }

    #[tokio::test]
    async fn test_intent_failure_keeps_order() {
        let cart = cart_with_item();
        let gateway = MockGateway {
            intent_transient_failures: Mutex::new(5),
            ..Default::default()
        };
        let (mut orch, _notices) = orchestrator(gateway);

        let err = orch
            .start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::PaymentIntent(_)));
        // No rollback on an intent failure: the order awaits a retry or
        // backend expiry.
        assert_eq!(orch.gateway.count("update_order_status"), 0);
        assert_eq!(orch.state().step, CheckoutStep::Payment);
        assert_eq!(orch.state().order_id.as_ref().unwrap().as_str(), "ord_1");
    }

    #[tokio::test]
    async fn test_in_flight_guard_rejects_reentry() {
        let cart = cart_with_item();
        let (mut orch, _notices) = orchestrator(MockGateway::default());
        orch.state.in_flight = true;

        let err = orch
            .start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Busy));
        assert!(orch.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_validation_runs_before_any_network_call() {
        let cart = cart_with_item();
        let (mut orch, _notices) = orchestrator(MockGateway::default());

        let bad_customer = CustomerInfo::new("X", "nope", "123");
        let err = orch
            .start_payment_flow(&cart, &bad_customer, &billing())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert!(orch.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let cart = CartStore::open(MemoryStore::new(), Box::new(NullSink));
        let (mut orch, _notices) = orchestrator(MockGateway::default());

        let err = orch
            .start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_confirm_without_flow() {
        let mut cart = cart_with_item();
        let (mut orch, _notices) = orchestrator(MockGateway::default());

        let err = orch
            .confirm_payment_success(&mut cart, "pm_123")
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MissingPaymentIntent));
    }

    #[tokio::test]
    async fn test_tokenization_failure_reported_externally() {
        let cart = cart_with_item();
        let (mut orch, notices) = orchestrator(MockGateway::default());

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        let kind = orch
            .handle_payment_failure("Your card was declined")
            .await;

        assert_eq!(kind, FailureKind::PaymentFailed);
        assert_eq!(orch.gateway.count("update_order_status"), 1);
        assert!(orch.state().error.is_some());
        assert!(notices
            .take()
            .iter()
            .any(|n| n.kind == NoticeKind::Error));
    }

    #[tokio::test]
    async fn test_cash_on_delivery_path() {
        let mut cart = cart_with_item();
        let (mut orch, notices) = orchestrator(MockGateway::default());

        let order_id = orch
            .place_cash_order(&mut cart, &customer(), &billing())
            .await
            .unwrap();

        assert_eq!(order_id.as_str(), "ord_1");
        assert!(cart.is_empty());
        // No payment calls on the cash path.
        assert_eq!(orch.gateway.calls(), vec!["create_order"]);
        assert!(notices
            .take()
            .iter()
            .any(|n| n.kind == NoticeKind::Success));
    }

    #[tokio::test]
    async fn test_payment_status_poll() {
        let cart = cart_with_item();
        let (mut orch, _notices) = orchestrator(MockGateway::default());

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        let status = orch.check_payment_status().await.unwrap();
        assert_eq!(status.status, "succeeded");
    }

    #[tokio::test]
    async fn test_reset_clears_flow() {
        let cart = cart_with_item();
        let (mut orch, _notices) = orchestrator(MockGateway::default());

        orch.start_payment_flow(&cart, &customer(), &billing())
            .await
            .unwrap();
        orch.reset();
        assert_eq!(orch.state(), &FlowState::new());
    }
}
