//! Refunds a payment, given only the merchant's reference for it.
//!
//! The processor refunds transactions, not merchant references, so the processor transaction behind the reference has
//! to be resolved first. The ledger is asked which processor transactions it has recorded against the reference. If
//! it knows of exactly one, that is the transaction that gets refunded. Otherwise the processor's own transaction
//! history is searched, and the refund only goes ahead if the search turns up a single candidate that is consistent
//! with what the ledger knows.

use std::fmt::Debug;

use log::*;
use rust_decimal::Decimal;

use crate::{
    fuse_api::{errors::RefundApiError, search_api::TransactionSearchApi},
    fuse_types::{Refund, RefundResult},
    traits::{LedgerManagement, PaymentProcessor},
};

pub const DEFAULT_SEARCH_DAYS: u32 = 7;

pub struct RefundApi<L, P> {
    ledger: L,
    search: TransactionSearchApi<P>,
    search_days: u32,
}

impl<L, P> Debug for RefundApi<L, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RefundApi (search window {} days)", self.search_days)
    }
}

impl<L, P> RefundApi<L, P> {
    pub fn new(ledger: L, processor: P) -> Self {
        Self { ledger, search: TransactionSearchApi::new(processor), search_days: DEFAULT_SEARCH_DAYS }
    }

    /// How far back to search the processor's history when the ledger cannot identify the transaction on its own.
    pub fn with_search_days(mut self, days: u32) -> Self {
        self.search_days = days;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.search = self.search.with_max_pages(max_pages);
        self
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn processor(&self) -> &P {
        self.search.processor()
    }
}

enum Resolution {
    Found(String),
    Unresolved(String),
}

impl<L, P> RefundApi<L, P>
where
    L: LedgerManagement,
    P: PaymentProcessor,
{
    /// Issue a refund of `refund.amount` against the payment identified by `refund.reference`.
    ///
    /// A refund that the processor declines, or that cannot be matched to a single processor transaction, is
    /// reported as a failed [`RefundResult`] with a reason. `Err` is reserved for invalid requests and for failures to
    /// reach the ledger or the processor.
    ///
    /// The processor only confirms that a refund has been *accepted* (status `PENDING`). The final outcome of the
    /// refund is not tracked.
    pub async fn handle(&self, refund: Refund) -> Result<RefundResult, RefundApiError> {
        validate_refund(&refund)?;
        let reference = refund.reference.as_str();
        let psp_reference = match self.resolve_psp_reference(reference).await? {
            Resolution::Found(psp_reference) => psp_reference,
            Resolution::Unresolved(reason) => {
                warn!("💸️ Refund {refund} cannot go ahead. {reason}");
                return Ok(RefundResult::failure(reason));
            },
        };
        debug!("💸️ Requesting refund {refund} against processor transaction {psp_reference}");
        let status = self.processor().refund_payment(reference, &psp_reference, refund.amount).await.map_err(|e| {
            error!("💸️ Refund {refund} could not be submitted to the processor. {e}");
            RefundApiError::from(e)
        })?;
        if status.is_accepted() {
            info!("💸️ Refund {refund} accepted by the processor");
            Ok(RefundResult::successful(reference, refund.amount))
        } else {
            warn!("💸️ Refund {refund} was not accepted by the processor. Status: {status}");
            Ok(RefundResult::failure(format!("The refund was not accepted by the payment processor. Status: {status}")))
        }
    }

    async fn resolve_psp_reference(&self, reference: &str) -> Result<Resolution, RefundApiError> {
        let mut transactions = self.ledger.fetch_processed_transactions(reference).await.map_err(|e| {
            error!("💸️ Could not fetch processed transactions for {reference} from the ledger. {e}");
            RefundApiError::from(e)
        })?;
        // Most recent first. Undated records keep their ledger order after the dated ones.
        transactions.sort_by(|a, b| b.created_date.cmp(&a.created_date));
        let mut candidates: Vec<String> = Vec::with_capacity(transactions.len());
        for tx in transactions {
            if !candidates.contains(&tx.psp_reference) {
                candidates.push(tx.psp_reference);
            }
        }
        if candidates.len() == 1 {
            return Ok(Resolution::Found(candidates.remove(0)));
        }
        debug!(
            "💸️ The ledger holds {} processor transactions for {reference}. Searching the last {} days of processor \
             history.",
            candidates.len(),
            self.search_days
        );
        let found = self.search.search_for_refund(reference, self.search_days).await?;
        let resolution = match (found, candidates.is_empty()) {
            (Some(payment), true) => Resolution::Found(payment.reference),
            (Some(payment), false) if candidates.contains(&payment.reference) => Resolution::Found(payment.reference),
            (_, true) => Resolution::Unresolved(format!("No processed transaction found for {reference}")),
            (_, false) => Resolution::Unresolved(format!(
                "The processed transaction for {reference} is ambiguous. The ledger holds {} candidates ({}) and the \
                 processor search could not single one out.",
                candidates.len(),
                candidates.join(", ")
            )),
        };
        Ok(resolution)
    }
}

fn validate_refund(refund: &Refund) -> Result<(), RefundApiError> {
    if refund.reference.trim().is_empty() {
        return Err(RefundApiError::InvalidRefund("The refund has no payment reference".into()));
    }
    if refund.amount <= Decimal::ZERO {
        return Err(RefundApiError::InvalidRefund(format!("The refund amount must be positive, not {}", refund.amount)));
    }
    Ok(())
}
