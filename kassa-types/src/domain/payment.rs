//! Payment object as returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::amount::Amount;
use crate::error::{ApiError, EmbeddedError};

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, waiting for the payer to act
    Pending,
    /// Paid by the payer, waiting for the shop to capture or cancel
    WaitingForCapture,
    Succeeded,
    Canceled,
    /// A status this client does not know about yet
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::WaitingForCapture => "waiting_for_capture",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Canceled => "canceled",
            PaymentStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the payer is asked to confirm the payment.
///
/// Used both in requests (`type` + `return_url`) and in responses, where the
/// API fills in `confirmation_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Confirmation {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce: Option<bool>,
}

impl Confirmation {
    /// Redirect confirmation that sends the payer back to `return_url`.
    pub fn redirect(return_url: impl Into<String>) -> Self {
        Self {
            kind: "redirect".to_string(),
            return_url: Some(return_url.into()),
            confirmation_url: None,
            confirmation_token: None,
            enforce: None,
        }
    }
}

/// Payment method used or saved for the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Option<String>,
    pub saved: Option<bool>,
    pub title: Option<String>,
}

/// Shop account and gateway that receive the funds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub account_id: Option<String>,
    pub gateway_id: Option<String>,
}

/// Who canceled the payment and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationDetails {
    pub party: String,
    pub reason: String,
}

/// A payment as reported by the API.
///
/// Everything the API may leave out is optional. When the API folds an error
/// into the body, `kind` is `"error"` and `description` holds the reason; the
/// remaining fields keep whatever else was sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default)]
    pub id: String,
    pub status: Option<PaymentStatus>,
    pub amount: Option<Amount>,
    pub income_amount: Option<Amount>,
    pub description: Option<String>,
    pub recipient: Option<Recipient>,
    pub payment_method: Option<PaymentMethod>,
    pub captured_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub confirmation: Option<Confirmation>,
    pub test: Option<bool>,
    pub paid: Option<bool>,
    pub refunded_amount: Option<Amount>,
    pub refundable: Option<bool>,
    pub metadata: Option<BTreeMap<String, serde_json::Value>>,
    pub cancellation_details: Option<CancellationDetails>,

    // Error markers
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
    pub parameter: Option<String>,
}

impl Payment {
    /// URL the payer should be redirected to, if the API issued one.
    pub fn confirmation_url(&self) -> Option<&str> {
        self.confirmation
            .as_ref()
            .and_then(|c| c.confirmation_url.as_deref())
    }
}

impl EmbeddedError for Payment {
    fn embedded_error(&self) -> Option<ApiError> {
        ApiError {
            kind: self.kind.clone(),
            id: (!self.id.is_empty()).then(|| self.id.clone()),
            code: self.code.clone(),
            description: self.description.clone(),
            parameter: self.parameter.clone(),
        }
        .embedded_error()
    }
}
