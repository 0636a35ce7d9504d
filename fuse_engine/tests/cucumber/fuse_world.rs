use cucumber::World;
use fuse_engine::{
    fuse_types::{NotificationParameters, Payment, ProcessPaymentResponseModel, RefundResult, SignedFieldSpec},
    NotificationApi,
    NotificationError,
    RefundApi,
    RefundApiError,
    TransactionSearchApi,
};

use super::collaborators::{MemoryLedger, MemoryProcessor};

#[derive(Debug, Default, World)]
pub struct FuseWorld {
    pub ledger: MemoryLedger,
    pub processor: MemoryProcessor,
    pub secret_key: String,
    pub signed_fields: Option<SignedFieldSpec>,
    pub notification: NotificationParameters,
    pub notification_result: Option<Result<ProcessPaymentResponseModel, NotificationError>>,
    pub refund_result: Option<Result<RefundResult, RefundApiError>>,
    pub search_result: Option<Vec<Payment>>,
}

impl FuseWorld {
    pub fn notification_api(&self) -> NotificationApi<MemoryLedger> {
        NotificationApi::new(self.ledger.clone())
    }

    pub fn refund_api(&self) -> RefundApi<MemoryLedger, MemoryProcessor> {
        RefundApi::new(self.ledger.clone(), self.processor.clone())
    }

    pub fn search_api(&self) -> TransactionSearchApi<MemoryProcessor> {
        TransactionSearchApi::new(self.processor.clone())
    }

    pub fn refund_result(&self) -> &RefundResult {
        match &self.refund_result {
            Some(Ok(result)) => result,
            Some(Err(e)) => panic!("The refund request failed: {e}"),
            None => panic!("No refund has been requested"),
        }
    }
}
