//! Payment builder and per-payment handle.

use std::collections::BTreeMap;

use kassa_types::{
    Amount, Confirmation, CreatePaymentRequest, IdempotencyKey, Payment, PaymentMethodData,
    Refund,
};
use tracing::instrument;

use crate::context::Context;
use crate::error::{Partial, Result};
use crate::{Kassa, decode};

/// A payment being prepared for `POST payments`.
///
/// Created by [`Kassa::new_payment`]. Nothing is sent until
/// [`create`](Self::create) is awaited.
#[derive(Debug, Clone)]
#[must_use = "a NewPayment does nothing until `create` is awaited"]
pub struct NewPayment<'a> {
    kassa: &'a Kassa,
    request: CreatePaymentRequest,
}

impl<'a> NewPayment<'a> {
    pub(crate) fn new(kassa: &'a Kassa, amount: Amount) -> Self {
        Self {
            kassa,
            request: CreatePaymentRequest::new(amount),
        }
    }

    /// Capture automatically once paid instead of waiting in
    /// `waiting_for_capture`.
    pub fn capture(mut self, capture: bool) -> Self {
        self.request.capture = Some(capture);
        self
    }

    /// Description shown to the payer.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.request.description = Some(description.into());
        self
    }

    /// Redirect confirmation, returning the payer to `return_url` afterwards.
    pub fn redirect(self, return_url: impl Into<String>) -> Self {
        self.confirmation(Confirmation::redirect(return_url))
    }

    pub fn confirmation(mut self, confirmation: Confirmation) -> Self {
        self.request.confirmation = Some(confirmation);
        self
    }

    /// Preselects the payment method type, e.g. `bank_card`.
    pub fn payment_method(mut self, kind: impl Into<String>) -> Self {
        self.request.payment_method_data = Some(PaymentMethodData { kind: kind.into() });
        self
    }

    /// Charges a payment method saved by an earlier payment.
    pub fn payment_method_id(mut self, id: impl Into<String>) -> Self {
        self.request.payment_method_id = Some(id.into());
        self
    }

    pub fn save_payment_method(mut self, save: bool) -> Self {
        self.request.save_payment_method = Some(save);
        self
    }

    pub fn client_ip(mut self, ip: impl Into<String>) -> Self {
        self.request.client_ip = Some(ip.into());
        self
    }

    /// Adds one metadata entry; the API echoes metadata back on the payment.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request
            .metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// The request body as it will be sent.
    pub fn request(&self) -> &CreatePaymentRequest {
        &self.request
    }

    /// Sends the payment to the API.
    #[instrument(skip_all, fields(amount = %self.request.amount))]
    pub async fn create(
        self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
    ) -> Result<Payment> {
        let body = serde_json::to_vec(&self.request)?;
        let body = self
            .kassa
            .api()
            .create_payment(ctx, &idempotency_key.into(), body)
            .await?;
        decode(&body, Partial::Payment)
    }
}

/// Operations bound to one existing payment.
///
/// Created by [`Kassa::payment`].
#[derive(Debug, Clone)]
pub struct PaymentRef<'a> {
    kassa: &'a Kassa,
    id: String,
}

impl<'a> PaymentRef<'a> {
    pub(crate) fn new(kassa: &'a Kassa, id: String) -> Self {
        Self { kassa, id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn find(&self, ctx: &Context) -> Result<Payment> {
        self.kassa.find_payment(ctx, &self.id).await
    }

    pub async fn capture(
        &self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
        value: &str,
        currency: &str,
    ) -> Result<Payment> {
        self.kassa
            .capture_payment(ctx, idempotency_key, &self.id, value, currency)
            .await
    }

    pub async fn cancel(
        &self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
    ) -> Result<Payment> {
        self.kassa.cancel_payment(ctx, idempotency_key, &self.id).await
    }

    pub async fn refund(
        &self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
        value: &str,
        currency: &str,
    ) -> Result<Refund> {
        self.kassa
            .create_refund(ctx, idempotency_key, &self.id, value, currency)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_collects_options() {
        let kassa = Kassa::new("shop-42", "test_secret");
        let payment = kassa
            .new_payment("100.00", "RUB")
            .capture(true)
            .description("Order #72")
            .redirect("https://shop.example/return")
            .payment_method("bank_card")
            .metadata("order_id", "72")
            .metadata("customer", "17");

        let json = serde_json::to_value(payment.request()).unwrap();
        assert_eq!(json["amount"], json!({ "value": "100.00", "currency": "RUB" }));
        assert_eq!(json["capture"], json!(true));
        assert_eq!(json["description"], json!("Order #72"));
        assert_eq!(json["confirmation"]["return_url"], json!("https://shop.example/return"));
        assert_eq!(json["payment_method_data"]["type"], json!("bank_card"));
        assert_eq!(json["metadata"], json!({ "customer": "17", "order_id": "72" }));
    }

    #[test]
    fn test_bare_builder_sends_amount_only() {
        let kassa = Kassa::new("shop-42", "test_secret");
        let payment = kassa.new_payment("1.00", "USD");
        assert_eq!(
            serde_json::to_value(payment.request()).unwrap(),
            json!({ "amount": { "value": "1.00", "currency": "USD" } })
        );
    }

    #[test]
    fn test_payment_ref_keeps_id() {
        let kassa = Kassa::new("shop-42", "test_secret");
        assert_eq!(kassa.payment("2d4").id(), "2d4");
    }
}
