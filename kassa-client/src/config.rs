//! Client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::{KassaError, Result};

/// Production endpoint of the v3 API.
pub const DEFAULT_API_URL: &str = "https://api.yookassa.ru/v3";

/// Shop credentials and endpoint used for every request.
#[derive(Clone)]
pub struct KassaConfig {
    pub(crate) api_url: String,
    pub(crate) shop_id: String,
    pub(crate) secret_key: String,
    pub(crate) timeout: Option<Duration>,
}

impl KassaConfig {
    /// Creates a configuration for the production endpoint.
    pub fn new(shop_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            shop_id: shop_id.into(),
            secret_key: secret_key.into(),
            timeout: None,
        }
    }

    /// Overrides the base URL (sandbox, proxy, or a local mock).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets a whole-request timeout on the default HTTP client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Loads configuration from environment variables.
    ///
    /// `KASSA_SHOP_ID` and `KASSA_SECRET_KEY` are required;
    /// `KASSA_API_URL` and `KASSA_TIMEOUT_SECS` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| {
                KassaError::Config(format!("{} environment variable is required", name))
            })
        };
        let mut config = Self::new(required("KASSA_SHOP_ID")?, required("KASSA_SECRET_KEY")?);

        if let Some(url) = lookup("KASSA_API_URL") {
            config = config.with_api_url(url);
        }
        if let Some(secs) = lookup("KASSA_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                KassaError::Config(format!("KASSA_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn shop_id(&self) -> &str {
        &self.shop_id
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for KassaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KassaConfig")
            .field("api_url", &self.api_url)
            .field("shop_id", &self.shop_id)
            .field("secret_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
