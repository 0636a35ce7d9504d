use cybersource_tools::{
    CreateSearchRequest,
    CybersourceApi,
    CybersourceApiError,
    TransactionSummary as CybersourceTransaction,
};
use fuse_common::parse_amount;
use fuse_engine::{
    fuse_types::{RefundStatus, TransactionSummary},
    search_objects::SearchRequest,
    traits::TransactionPage,
    PaymentProcessor,
    ProcessorError,
};
use log::*;
use rust_decimal::Decimal;

/// The Cybersource REST API, as seen by the engine.
#[derive(Clone)]
pub struct CybersourceProcessor {
    api: CybersourceApi,
}

impl CybersourceProcessor {
    pub fn new(api: CybersourceApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &CybersourceApi {
        &self.api
    }
}

impl PaymentProcessor for CybersourceProcessor {
    async fn refund_payment(
        &self,
        client_reference: &str,
        psp_reference: &str,
        amount: Decimal,
    ) -> Result<RefundStatus, ProcessorError> {
        let response =
            self.api.refund_payment(client_reference, psp_reference, amount).await.map_err(processor_error)?;
        if let Some(info) = &response.error_information {
            debug!(
                "💸️ Refund {} for {client_reference} came back with {}: {}",
                response.id,
                info.reason.as_deref().unwrap_or("no reason"),
                info.message.as_deref().unwrap_or("no message")
            );
        }
        Ok(RefundStatus::from_processor_code(&response.status))
    }

    async fn search_transactions(&self, request: &SearchRequest) -> Result<TransactionPage, ProcessorError> {
        let response = self.api.create_search(&create_search_request(request)).await.map_err(processor_error)?;
        let total_count = response.total_count;
        let offset = response.offset;
        let summaries = response
            .into_transaction_summaries()
            .iter()
            .map(summary_from_cybersource)
            .collect::<Result<Vec<_>, _>>()
            .map_err(processor_error)?;
        Ok(TransactionPage::new(total_count, offset, summaries))
    }
}

pub fn create_search_request(request: &SearchRequest) -> CreateSearchRequest {
    CreateSearchRequest {
        save: request.save,
        name: request.name.clone(),
        timezone: request.timezone.clone(),
        query: request.query.clone(),
        offset: request.offset,
        limit: request.limit,
        sort: request.sort.clone(),
    }
}

/// Reduces a Cybersource transaction summary to the fields the engine reasons about. A missing amount is read as zero.
pub fn summary_from_cybersource(tx: &CybersourceTransaction) -> Result<TransactionSummary, CybersourceApiError> {
    let amount = match tx.total_amount() {
        Some(s) => parse_amount(s).map_err(|e| CybersourceApiError::InvalidCurrencyAmount(e.to_string()))?,
        None => {
            warn!("🔎️ Transaction {} has no amount. Recording it as zero.", tx.id);
            Decimal::ZERO
        },
    };
    let card = tx.card();
    Ok(TransactionSummary {
        id: tx.id.clone(),
        client_reference: tx.client_reference().map(String::from),
        submitted_at: tx.submit_time_utc,
        approval_code: tx.approval_code().map(String::from),
        amount,
        card_prefix: card.and_then(|c| c.prefix.clone()),
        card_suffix: card.and_then(|c| c.suffix.clone()),
        captured: tx.is_captured(),
    })
}

fn processor_error(e: CybersourceApiError) -> ProcessorError {
    match e {
        CybersourceApiError::QueryError { status, message } => ProcessorError::Rejected { status, message },
        CybersourceApiError::JsonError(s) | CybersourceApiError::InvalidCurrencyAmount(s) => {
            ProcessorError::InvalidResponse(s)
        },
        e => ProcessorError::Transport(e.to_string()),
    }
}
