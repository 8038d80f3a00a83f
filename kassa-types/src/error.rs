//! Error bodies reported by the API.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of the `type` field that marks a body as an error report.
pub const ERROR_TYPE: &str = "error";

/// Error object returned by the API.
///
/// Sent as the whole body of a non-200 response, and sometimes folded into an
/// otherwise normal 200 body through the same `type`/`description` fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Identifier of the error instance, useful when contacting support
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Machine-readable code such as `invalid_request` or `not_found`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Name of the request parameter the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl ApiError {
    /// Returns true when the body carries the error indicator: a `type` of
    /// `"error"` and a non-empty description.
    pub fn is_indicated(&self) -> bool {
        self.kind.as_deref() == Some(ERROR_TYPE)
            && self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Returns the human-readable description, or an empty string.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.description.as_deref(), self.code.as_deref()) {
            (Some(desc), _) if !desc.is_empty() => f.write_str(desc),
            (_, Some(code)) => write!(f, "API error code {}", code),
            _ => f.write_str("unspecified API error"),
        }
    }
}

/// Response objects that may carry an error report inside a 200 body.
pub trait EmbeddedError {
    /// Extracts the error report if the indicator is present.
    fn embedded_error(&self) -> Option<ApiError>;
}

impl EmbeddedError for ApiError {
    fn embedded_error(&self) -> Option<ApiError> {
        self.is_indicated().then(|| self.clone())
    }
}
