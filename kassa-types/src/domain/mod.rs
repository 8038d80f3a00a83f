//! Resource objects exchanged with the payments API.

pub mod amount;
pub mod idempotency;
pub mod payment;
pub mod refund;

pub use amount::Amount;
pub use idempotency::IdempotencyKey;
pub use payment::{
    CancellationDetails, Confirmation, Payment, PaymentMethod, PaymentStatus, Recipient,
};
pub use refund::{Refund, RefundStatus};
