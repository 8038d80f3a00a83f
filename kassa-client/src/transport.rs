//! Authenticated HTTP transport.
//!
//! Every request gets the same treatment: Basic Auth with the shop
//! credentials, a JSON content type, and the client `User-Agent`. POSTs also
//! carry the caller's idempotency key. Any status other than 200 is turned
//! into an error after the body has been drained.

use kassa_types::{ApiError, IdempotencyKey};
use reqwest::{Method, StatusCode, Url, header};
use tracing::{debug, instrument};

use crate::config::KassaConfig;
use crate::context::Context;
use crate::error::{KassaError, Result};

/// Client identifier sent as `User-Agent` on every request.
pub const USER_AGENT: &str = concat!("kassa-client-rs/", env!("CARGO_PKG_VERSION"));

/// Header carrying the idempotency key on mutating requests.
pub const IDEMPOTENCE_KEY: &str = "Idempotence-Key";

/// Low-level API client: endpoint paths and request dispatch.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: KassaConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: KassaConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &KassaConfig {
        &self.config
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn set_http(&mut self, http: reqwest::Client) {
        self.http = http;
    }

    /// `POST payments`
    pub async fn create_payment(
        &self,
        ctx: &Context,
        idempotency_key: &IdempotencyKey,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        self.send(ctx, Method::POST, &["payments"], Some(idempotency_key), Some(body))
            .await
    }

    /// `GET payments/{id}`
    pub async fn find_payment(&self, ctx: &Context, payment_id: &str) -> Result<Vec<u8>> {
        let segments = ["payments", path_segment(payment_id)?];
        self.send(ctx, Method::GET, &segments, None, None).await
    }

    /// `POST payments/{id}/capture`
    pub async fn capture_payment(
        &self,
        ctx: &Context,
        idempotency_key: &IdempotencyKey,
        payment_id: &str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let segments = ["payments", path_segment(payment_id)?, "capture"];
        self.send(ctx, Method::POST, &segments, Some(idempotency_key), Some(body))
            .await
    }

    /// `POST payments/{id}/cancel`
    pub async fn cancel_payment(
        &self,
        ctx: &Context,
        idempotency_key: &IdempotencyKey,
        payment_id: &str,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let segments = ["payments", path_segment(payment_id)?, "cancel"];
        self.send(ctx, Method::POST, &segments, Some(idempotency_key), Some(body))
            .await
    }

    /// `POST refunds`
    pub async fn create_refund(
        &self,
        ctx: &Context,
        idempotency_key: &IdempotencyKey,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        self.send(ctx, Method::POST, &["refunds"], Some(idempotency_key), Some(body))
            .await
    }

    /// GET an arbitrary `/`-separated path below the base URL.
    pub async fn get(&self, ctx: &Context, path: &str) -> Result<Vec<u8>> {
        let segments = split_path(path)?;
        self.send(ctx, Method::GET, &segments, None, None).await
    }

    /// POST to an arbitrary `/`-separated path below the base URL.
    pub async fn post(
        &self,
        ctx: &Context,
        path: &str,
        idempotency_key: &IdempotencyKey,
        body: Vec<u8>,
    ) -> Result<Vec<u8>> {
        let segments = split_path(path)?;
        self.send(ctx, Method::POST, &segments, Some(idempotency_key), Some(body))
            .await
    }

    /// Base URL with `segments` appended, each percent-encoded as one segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_url).map_err(|e| {
            KassaError::Config(format!("invalid API URL {}: {}", self.config.api_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                KassaError::Config(format!("API URL cannot be a base: {}", self.config.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    #[instrument(skip(self, ctx, idempotency_key, body))]
    async fn send(
        &self,
        ctx: &Context,
        method: Method,
        segments: &[&str],
        idempotency_key: Option<&IdempotencyKey>,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>> {
        let mut req = self
            .http
            .request(method, self.endpoint(segments)?)
            .basic_auth(&self.config.shop_id, Some(&self.config.secret_key))
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::USER_AGENT, USER_AGENT);
        if let Some(key) = idempotency_key {
            req = req.header(IDEMPOTENCE_KEY, key.as_str());
        }
        if let Some(body) = body {
            req = req.body(body);
        }

        ctx.run(async {
            let resp = req.send().await?;
            let status = resp.status();
            debug!(status = status.as_u16(), "response received");

            let body = resp.bytes().await?;
            if status != StatusCode::OK {
                return Err(error_from_body(status, &body));
            }
            Ok(body.to_vec())
        })
        .await
    }
}

/// Turns a non-200 body into an error, keeping the API's own report when the
/// body is one.
pub(crate) fn error_from_body(status: StatusCode, body: &[u8]) -> KassaError {
    match serde_json::from_slice::<ApiError>(body) {
        Ok(error) if error.description.is_some() || error.code.is_some() => KassaError::Api {
            status: status.as_u16(),
            error,
        },
        _ => KassaError::UnexpectedStatus {
            status: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}

/// Validates an identifier used as a single path segment.
///
/// Dot segments and separators are refused; anything else is percent-encoded
/// by [`ApiClient::endpoint`].
fn path_segment(id: &str) -> Result<&str> {
    if id.is_empty() {
        return Err(KassaError::InvalidArgument("path segment is empty".into()));
    }
    if id == "." || id == ".." {
        return Err(KassaError::InvalidArgument(format!(
            "path segment is a dot segment: {}",
            id
        )));
    }
    if id.contains(['/', '\\', '?', '#']) {
        return Err(KassaError::InvalidArgument(format!(
            "path segment contains a reserved URL character: {}",
            id
        )));
    }
    Ok(id)
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    path.split('/').map(path_segment).collect()
}
