//! # Kassa Types
//!
//! Wire types for the YooKassa v3 payments API.
//! This crate has no IO dependencies - only data structures and the
//! error-report conventions of the API.
//!
//! - `domain/` - Resource objects (Amount, Payment, Refund) and the idempotency key
//! - `dto/` - Request bodies for each endpoint
//! - `error/` - Error report body and the embedded error indicator

pub mod domain;
pub mod dto;
pub mod error;

// Re-export commonly used types
pub use domain::{
    Amount, CancellationDetails, Confirmation, IdempotencyKey, Payment, PaymentMethod,
    PaymentStatus, Recipient, Refund, RefundStatus,
};
pub use dto::*;
pub use error::{ApiError, ERROR_TYPE, EmbeddedError};
