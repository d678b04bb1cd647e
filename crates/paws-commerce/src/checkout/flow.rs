//! Checkout flow state.

use crate::ids::{OrderId, PaymentIntentId};

/// Steps of the card-payment flow, forward-only on the happy path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutStep {
    /// Creating the order.
    Order,
    /// Creating the payment intent and collecting card details.
    Payment,
    /// Payment confirmed.
    Confirmation,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Order => "order",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Confirmation => "confirmation",
        }
    }
}

/// Ephemeral per-attempt flow state. Never persisted.
///
/// A failure leaves the flow on the step it failed at with `error` set,
/// so the caller can retry that step or abandon. `in_flight` is the
/// duplicate-submission lock: while set, new entry calls are rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowState {
    pub step: CheckoutStep,
    /// Assigned once order creation succeeds; immutable afterwards for
    /// the lifetime of the flow.
    pub order_id: Option<OrderId>,
    pub payment_intent_id: Option<PaymentIntentId>,
    pub client_secret: Option<String>,
    /// Last failure message, cleared at the start of each attempt.
    pub error: Option<String>,
    pub in_flight: bool,
}

impl FlowState {
    pub fn new() -> Self {
        Self {
            step: CheckoutStep::Order,
            order_id: None,
            payment_intent_id: None,
            client_secret: None,
            error: None,
            in_flight: false,
        }
    }

    /// Drop all per-attempt state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record a failure on the current step and release the lock.
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.in_flight = false;
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let state = FlowState::new();
        assert_eq!(state.step, CheckoutStep::Order);
        assert!(state.order_id.is_none());
        assert!(!state.in_flight);
    }

    #[test]
    fn test_fail_releases_lock() {
        let mut state = FlowState::new();
        state.in_flight = true;
        state.fail("boom");
        assert!(!state.in_flight);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.step, CheckoutStep::Order);
    }

    #[test]
    fn test_reset() {
        let mut state = FlowState::new();
        state.order_id = Some(OrderId::new("ord_1"));
        state.error = Some("x".into());
        state.reset();
        assert_eq!(state, FlowState::new());
    }
}
