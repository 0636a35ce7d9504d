use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    fuse_api::search_objects::SearchRequest,
    fuse_types::RefundStatus,
    traits::TransactionPage,
};

#[derive(Debug, Clone, Error)]
pub enum ProcessorError {
    #[error("Could not reach the payment processor: {0}")]
    Transport(String),
    #[error("The payment processor rejected the request. Status {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("The payment processor sent a response that could not be understood: {0}")]
    InvalidResponse(String),
}

/// The card processor that captured the original payments.
#[allow(async_fn_in_trait)]
pub trait PaymentProcessor {
    /// Request a refund of `amount` against the processor transaction `psp_reference`. The request is tagged with
    /// the merchant's `client_reference`. Returns the status the processor assigned to the refund request.
    async fn refund_payment(
        &self,
        client_reference: &str,
        psp_reference: &str,
        amount: Decimal,
    ) -> Result<RefundStatus, ProcessorError>;

    /// Run a single page of a transaction search.
    async fn search_transactions(&self, request: &SearchRequest) -> Result<TransactionPage, ProcessorError>;
}
