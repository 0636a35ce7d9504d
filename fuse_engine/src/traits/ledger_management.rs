use thiserror::Error;

use crate::fuse_types::{ProcessPaymentModel, ProcessPaymentResponseModel, ProcessedTransaction};

#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Could not reach the ledger: {0}")]
    Transport(String),
    #[error("The ledger rejected the request. Status {status}. {message}")]
    Rejected { status: u16, message: String },
    #[error("The ledger sent a response that could not be understood: {0}")]
    InvalidResponse(String),
    #[error("'{0}' cannot be used as a payment reference")]
    InvalidReference(String),
}

/// The merchant's payment ledger. It owns the payment records; the engine only reports outcomes to it.
#[allow(async_fn_in_trait)]
pub trait LedgerManagement {
    /// Record the settlement outcome of the payment identified by `merchant_reference`. The ledger's response is
    /// passed back to the caller unchanged.
    async fn process_payment(
        &self,
        merchant_reference: &str,
        model: &ProcessPaymentModel,
    ) -> Result<ProcessPaymentResponseModel, LedgerError>;

    /// Fetch the processor transactions that the ledger has recorded against `merchant_reference`. An unknown
    /// reference yields an empty list, not an error.
    async fn fetch_processed_transactions(
        &self,
        merchant_reference: &str,
    ) -> Result<Vec<ProcessedTransaction>, LedgerError>;
}
