//! Searches the processor's transaction history for payments that can be reconciled against the merchant's ledger.

use std::{collections::HashSet, fmt::Debug};

use log::*;

use crate::{
    fuse_api::{errors::SearchError, search_objects::SearchRequest},
    fuse_types::{Payment, TransactionSummary},
    traits::PaymentProcessor,
};

pub const DEFAULT_MAX_PAGES: usize = 10;

pub struct TransactionSearchApi<P> {
    processor: P,
    max_pages: usize,
}

impl<P> Debug for TransactionSearchApi<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransactionSearchApi (max {} pages)", self.max_pages)
    }
}

impl<P> TransactionSearchApi<P> {
    pub fn new(processor: P) -> Self {
        Self { processor, max_pages: DEFAULT_MAX_PAGES }
    }

    /// Limit the number of pages a single search may fetch. Values below 1 are treated as 1.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn processor(&self) -> &P {
        &self.processor
    }
}

impl<P> TransactionSearchApi<P>
where P: PaymentProcessor
{
    /// Fetch every transaction submitted in the last `days_ago` days for `client_reference` (or every transaction in
    /// the window if the reference is empty), most recent first.
    ///
    /// Pages are followed until the processor has no more records, or until the page limit is reached, in which case
    /// a warning is logged and the records fetched so far are returned.
    pub async fn search(&self, client_reference: &str, days_ago: u32) -> Result<Vec<TransactionSummary>, SearchError> {
        let mut request = SearchRequest::new(client_reference, days_ago);
        let mut summaries = Vec::new();
        for page_num in 1..=self.max_pages {
            trace!("🔎️ Fetching search page {page_num}: {request}");
            let page = self.processor.search_transactions(&request).await.map_err(|e| {
                error!("🔎️ Transaction search {request} failed. {e}");
                SearchError::from(e)
            })?;
            let has_more = page.has_more(request.limit);
            summaries.extend(page.summaries);
            if !has_more {
                debug!("🔎️ Search for '{client_reference}' complete. {} transactions found", summaries.len());
                return Ok(summaries);
            }
            request = request.next_page();
        }
        warn!(
            "🔎️ Search for '{client_reference}' stopped after {} pages. {} transactions were fetched but more are \
             available.",
            self.max_pages,
            summaries.len()
        );
        Ok(summaries)
    }

    /// Search for authorised payments that can be reconciled. See [`payments_from_summaries`].
    pub async fn search_uncaptured(&self, client_reference: &str, days_ago: u32) -> Result<Vec<Payment>, SearchError> {
        let summaries = self.search(client_reference, days_ago).await?;
        let payments = payments_from_summaries(&summaries);
        debug!("🔎️ {} authorised payments found for '{client_reference}'", payments.len());
        Ok(payments)
    }

    /// Search for the single payment that a refund against `client_reference` should be issued against.
    ///
    /// Returns `None` unless exactly one distinct authorised transaction matches.
    pub async fn search_for_refund(&self, client_reference: &str, days_ago: u32) -> Result<Option<Payment>, SearchError> {
        let mut payments = self.search_uncaptured(client_reference, days_ago).await?;
        match payments.len() {
            1 => Ok(payments.pop()),
            0 => {
                debug!("🔎️ No refundable transaction found for '{client_reference}'");
                Ok(None)
            },
            n => {
                info!("🔎️ {n} refundable transactions found for '{client_reference}'. Cannot pick one.");
                Ok(None)
            },
        }
    }
}

/// Converts processor transactions into reconciliation records.
///
/// Only transactions with an approval code are kept. Each record gets a fresh identifier, so duplicates are removed
/// on the processor transaction id, keeping the first (i.e. most recent) occurrence.
pub fn payments_from_summaries(summaries: &[TransactionSummary]) -> Vec<Payment> {
    let mut seen = HashSet::new();
    summaries
        .iter()
        .filter(|tx| tx.is_authorised())
        .filter(|tx| seen.insert(tx.id.as_str()))
        .map(Payment::from)
        .collect()
}
