use mockall::mock;
use rust_decimal::Decimal;

use crate::{
    fuse_api::search_objects::SearchRequest,
    fuse_types::{ProcessPaymentModel, ProcessPaymentResponseModel, ProcessedTransaction, RefundStatus},
    traits::{LedgerError, LedgerManagement, PaymentProcessor, ProcessorError, TransactionPage},
};

mock! {
    pub Ledger {}
    impl LedgerManagement for Ledger {
        async fn process_payment(&self, merchant_reference: &str, model: &ProcessPaymentModel) -> Result<ProcessPaymentResponseModel, LedgerError>;
        async fn fetch_processed_transactions(&self, merchant_reference: &str) -> Result<Vec<ProcessedTransaction>, LedgerError>;
    }
}

mock! {
    pub Processor {}
    impl PaymentProcessor for Processor {
        async fn refund_payment(&self, client_reference: &str, psp_reference: &str, amount: Decimal) -> Result<RefundStatus, ProcessorError>;
        async fn search_transactions(&self, request: &SearchRequest) -> Result<TransactionPage, ProcessorError>;
    }
}
