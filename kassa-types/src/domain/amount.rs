//! Monetary amount as the API represents it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A decimal amount paired with an ISO 4217 currency code.
///
/// The value is kept as the decimal string the API sends and expects
/// (`"100.00"`). No arithmetic or rounding happens locally; the remote side
/// owns every amount rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: String,
}

impl Amount {
    /// Creates a new Amount.
    pub fn new(value: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            currency: currency.into(),
        }
    }

    /// Returns the decimal value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the currency code.
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
