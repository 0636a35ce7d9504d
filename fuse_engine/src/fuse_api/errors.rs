use thiserror::Error;

use crate::traits::{LedgerError, ProcessorError};

/// The message given to callers whenever a notification cannot be authenticated. Missing and mismatched signatures
/// are deliberately indistinguishable.
pub const PAYMENT_VALIDATION_MESSAGE: &str = "Unable to process the payment";

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("{0}")]
    PaymentValidation(String),
    #[error("The payment outcome could not be recorded. {0}")]
    Ledger(#[from] LedgerError),
}

impl NotificationError {
    pub fn validation() -> Self {
        Self::PaymentValidation(PAYMENT_VALIDATION_MESSAGE.to_string())
    }
}

#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("The transaction search failed. {0}")]
    Upstream(#[from] ProcessorError),
}

#[derive(Debug, Clone, Error)]
pub enum RefundApiError {
    #[error("Invalid refund request. {0}")]
    InvalidRefund(String),
    #[error("The ledger could not be queried. {0}")]
    Ledger(#[from] LedgerError),
    #[error("The payment processor could not be reached. {0}")]
    Processor(#[from] ProcessorError),
}

impl From<SearchError> for RefundApiError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Upstream(e) => Self::Processor(e),
        }
    }
}
