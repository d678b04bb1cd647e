//! [`CommerceGateway`] adapter over the REST client.
//!
//! Maps each gateway operation to its endpoint and normalizes the
//! response envelope into the canonical shapes the domain expects.

use async_trait::async_trait;
use tracing::info;

use paws_commerce::checkout::{
    CommerceGateway, ConfirmPaymentRequest, CreateOrderRequest, OrderCreated, PaymentConfirmed,
    PaymentIntentCreated, PaymentIntentRequest, PaymentStatusInfo, StatusUpdateRequest,
};
use paws_commerce::{GatewayError, OrderId, PaymentIntentId};

use crate::transport::HttpTransport;
use crate::{envelope, ApiClient};

#[async_trait]
impl<T: HttpTransport> CommerceGateway for ApiClient<T> {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<OrderCreated, GatewayError> {
        let value = self.post("/orders", request).await.map_err(GatewayError::from)?;
        let order_id = envelope::order_id(&value).ok_or_else(|| {
            GatewayError::rejected(None, "order creation response carried no order id")
        })?;
        info!(%order_id, "order created");
        Ok(OrderCreated {
            order_id: OrderId::new(order_id),
        })
    }

    async fn create_payment_intent(
        &self,
        request: &PaymentIntentRequest,
    ) -> Result<PaymentIntentCreated, GatewayError> {
        let value = self
            .post("/payments/create-payment-intent", request)
            .await
            .map_err(GatewayError::from)?;
        let (payment_intent_id, client_secret) =
            envelope::payment_intent(&value).ok_or_else(|| {
                GatewayError::rejected(None, "payment intent response carried no client secret")
            })?;
        info!(%payment_intent_id, "payment intent created");
        Ok(PaymentIntentCreated {
            payment_intent_id: PaymentIntentId::new(payment_intent_id),
            client_secret,
        })
    }

    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> Result<PaymentConfirmed, GatewayError> {
        let value = self
            .post("/payments/confirm-payment", request)
            .await
            .map_err(GatewayError::from)?;
        Ok(PaymentConfirmed {
            status: envelope::status(&value),
        })
    }

    async fn update_order_status(
        &self,
        order_id: &OrderId,
        request: &StatusUpdateRequest,
    ) -> Result<(), GatewayError> {
        self.put(&format!("/orders/{order_id}/status"), request)
            .await
            .map_err(GatewayError::from)?;
        Ok(())
    }

    async fn payment_status(
        &self,
        payment_intent_id: &PaymentIntentId,
    ) -> Result<PaymentStatusInfo, GatewayError> {
        let value = self
            .get(&format!("/payments/status/{payment_intent_id}"))
            .await
            .map_err(GatewayError::from)?;
        let status = envelope::status(&value)
            .ok_or_else(|| GatewayError::rejected(None, "status response carried no status"))?;
        Ok(PaymentStatusInfo { status })
    }
}
