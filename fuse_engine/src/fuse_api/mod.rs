//! # Fuse engine public API
//!
//! The `fuse_api` module exposes the three flows the adapter supports. Each API is created by supplying the
//! collaborators that implement the traits in [`crate::traits`].
//!
//! * [`notification_api`] verifies a gateway payment notification, classifies its outcome and reports it to the
//!   ledger.
//! * [`search_api`] searches the processor's transaction history for authorised payments that can be reconciled.
//! * [`refund_api`] resolves the processor transaction behind a merchant reference and refunds it.
//!
//! ```rust,ignore
//! let api = NotificationApi::new(ledger);
//! let ack = api.handle(params, &signed_fields, secret_key.as_bytes()).await?;
//! ```

pub mod errors;
pub mod notification_api;
pub mod refund_api;
pub mod search_api;
pub mod search_objects;

#[cfg(test)]
mod mocks;
