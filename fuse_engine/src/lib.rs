//! Fuse Payment Engine
//!
//! The engine holds the parts of the Fuse payment adapter where correctness actually matters. It knows nothing about
//! HTTP: the merchant ledger and the payment processor are reached through the traits in [`mod@traits`], and the
//! binaries that embed the engine supply the concrete clients.
//!
//! The library is divided into three sections:
//! 1. The data types shared with the collaborators ([`mod@fuse_types`]). These are the normalized records that flow
//!    between the gateway, the engine and the ledger.
//! 2. Signature helpers ([`mod@helpers`]) that reproduce the gateway's merchant signature bit for bit.
//! 3. The public API ([`mod@fuse_api`]):
//!    * [`NotificationApi`] verifies inbound payment notifications and settles them on the ledger.
//!    * [`TransactionSearchApi`] queries the processor's transaction search and turns the results into `Payment`
//!      records.
//!    * [`RefundApi`] resolves the processor transaction behind a merchant reference and refunds it.
pub mod fuse_api;
pub mod fuse_types;
pub mod helpers;
pub mod traits;

pub use fuse_api::{
    errors::{NotificationError, RefundApiError, SearchError},
    notification_api::NotificationApi,
    refund_api::RefundApi,
    search_api::TransactionSearchApi,
    search_objects,
};
pub use traits::{LedgerError, LedgerManagement, PaymentProcessor, ProcessorError};
