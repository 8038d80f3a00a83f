//! # Kassa Client SDK
//!
//! A typed async Rust client for the YooKassa v3 payments API.
//!
//! ```no_run
//! use kassa_client::{Context, Kassa};
//!
//! # async fn run() -> kassa_client::Result<()> {
//! let kassa = Kassa::new("shop-id", "secret-key");
//! let ctx = Context::background();
//!
//! let payment = kassa
//!     .new_payment("100.00", "RUB")
//!     .description("Order #72")
//!     .redirect("https://shop.example/return")
//!     .create(&ctx, "order-72")
//!     .await?;
//!
//! let payment = kassa.find_payment(&ctx, &payment.id).await?;
//! println!("{} is {:?}", payment.id, payment.status);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod payment;
pub mod transport;

use kassa_types::{
    Amount, CancelPaymentRequest, CapturePaymentRequest, CreateRefundRequest, EmbeddedError,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

pub use kassa_types::{ApiError, IdempotencyKey, Payment, PaymentStatus, Refund, RefundStatus};

pub use config::{DEFAULT_API_URL, KassaConfig};
pub use context::{CancelHandle, Context};
pub use error::{KassaError, Partial, Result};
pub use payment::{NewPayment, PaymentRef};
pub use transport::{ApiClient, IDEMPOTENCE_KEY, USER_AGENT};

/// Payments API client.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Kassa {
    api: ApiClient,
}

impl Kassa {
    /// Creates a client for the production endpoint with a default HTTP client.
    pub fn new(shop_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api: ApiClient::new(KassaConfig::new(shop_id, secret_key), reqwest::Client::new()),
        }
    }

    /// Creates a client from a full configuration, applying its timeout to
    /// the default HTTP client.
    pub fn from_config(config: KassaConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            api: ApiClient::new(config, builder.build()?),
        })
    }

    /// Replaces the HTTP client (proxies, custom TLS, test servers).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.api.set_http(http);
        self
    }

    /// Swaps the HTTP client in place.
    pub fn set_http_client(&mut self, http: reqwest::Client) {
        self.api.set_http(http);
    }

    pub fn config(&self) -> &KassaConfig {
        self.api.config()
    }

    /// Transport used by this client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Starts a new payment for `value` in `currency`.
    ///
    /// The returned builder takes the optional settings and sends the request
    /// with [`NewPayment::create`].
    pub fn new_payment(
        &self,
        value: impl Into<String>,
        currency: impl Into<String>,
    ) -> NewPayment<'_> {
        NewPayment::new(self, Amount::new(value, currency))
    }

    /// Handle for the operations on an existing payment.
    pub fn payment(&self, payment_id: impl Into<String>) -> PaymentRef<'_> {
        PaymentRef::new(self, payment_id.into())
    }

    /// Fetches the current state of a payment.
    #[instrument(skip(self, ctx))]
    pub async fn find_payment(&self, ctx: &Context, payment_id: &str) -> Result<Payment> {
        let body = self.api.find_payment(ctx, payment_id).await?;
        decode(&body, Partial::Payment)
    }

    /// Confirms the shop is ready to accept a payment in
    /// `waiting_for_capture`. The amount may be lower than the authorized one.
    #[instrument(skip(self, ctx, idempotency_key))]
    pub async fn capture_payment(
        &self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
        payment_id: &str,
        value: &str,
        currency: &str,
    ) -> Result<Payment> {
        let req = CapturePaymentRequest {
            amount: Amount::new(value, currency),
        };
        let body = serde_json::to_vec(&req)?;
        let body = self
            .api
            .capture_payment(ctx, &idempotency_key.into(), payment_id, body)
            .await?;
        decode(&body, Partial::Payment)
    }

    /// Cancels a payment in `waiting_for_capture`.
    #[instrument(skip(self, ctx, idempotency_key))]
    pub async fn cancel_payment(
        &self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
        payment_id: &str,
    ) -> Result<Payment> {
        let body = serde_json::to_vec(&CancelPaymentRequest {})?;
        let body = self
            .api
            .cancel_payment(ctx, &idempotency_key.into(), payment_id, body)
            .await?;
        decode(&body, Partial::Payment)
    }

    /// Refunds `value` of a succeeded payment.
    pub async fn create_refund(
        &self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
        payment_id: &str,
        value: &str,
        currency: &str,
    ) -> Result<Refund> {
        let req = CreateRefundRequest {
            payment_id: payment_id.to_string(),
            amount: Amount::new(value, currency),
            description: None,
        };
        self.submit_refund(ctx, idempotency_key, &req).await
    }

    /// Sends a fully built refund request.
    #[instrument(skip(self, ctx, idempotency_key, req), fields(payment_id = %req.payment_id))]
    pub async fn submit_refund(
        &self,
        ctx: &Context,
        idempotency_key: impl Into<IdempotencyKey>,
        req: &CreateRefundRequest,
    ) -> Result<Refund> {
        if req.payment_id.is_empty() {
            return Err(KassaError::InvalidArgument("payment id is empty".into()));
        }
        let body = serde_json::to_vec(req)?;
        let body = self
            .api
            .create_refund(ctx, &idempotency_key.into(), body)
            .await?;
        decode(&body, Partial::Refund)
    }
}

/// Decodes a 200 body and surfaces an error report folded into it.
pub(crate) fn decode<T>(body: &[u8], partial: fn(T) -> Partial) -> Result<T>
where
    T: DeserializeOwned + EmbeddedError,
{
    let value: T = serde_json::from_slice(body)?;
    match value.embedded_error() {
        Some(error) => {
            debug!(code = ?error.code, "error reported in a 200 response");
            Err(KassaError::Rejected {
                error,
                partial: Box::new(partial(value)),
            })
        }
        None => Ok(value),
    }
}
