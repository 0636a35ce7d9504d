use crate::fuse_types::TransactionSummary;

/// One page of processor search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionPage {
    /// The total number of matches the processor reports for the query, across all pages.
    pub total_count: usize,
    /// The offset of the first summary in this page.
    pub offset: usize,
    pub summaries: Vec<TransactionSummary>,
}

impl TransactionPage {
    pub fn new(total_count: usize, offset: usize, summaries: Vec<TransactionSummary>) -> Self {
        Self { total_count, offset, summaries }
    }

    /// True if the processor holds further records beyond this page.
    pub fn has_more(&self, page_size: usize) -> bool {
        let fetched = self.summaries.len();
        fetched > 0 && fetched >= page_size && self.offset + fetched < self.total_count
    }
}
