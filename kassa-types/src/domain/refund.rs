//! Refund object as returned by the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amount::Amount;
use crate::error::{ApiError, EmbeddedError};

/// State of a refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Pending,
    Succeeded,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl RefundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "pending",
            RefundStatus::Succeeded => "succeeded",
            RefundStatus::Canceled => "canceled",
            RefundStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A refund of a captured payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub payment_id: String,
    pub status: Option<RefundStatus>,
    pub amount: Option<Amount>,
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,

    // Error markers
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
    pub parameter: Option<String>,
}

impl EmbeddedError for Refund {
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
