use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// The number of records requested per search page. This is the processor's maximum.
pub const PAGE_SIZE: usize = 1000;
pub const SEARCH_NAME: &str = "MRN";
pub const SEARCH_TIMEZONE: &str = "Europe/London";
pub const SEARCH_SORT: &str = "submitTimeUtc:desc";

/// Builds the processor's date-math window covering the last `days_ago` days, up to the end of today.
///
/// ```
/// # use fuse_engine::search_objects::submit_time_window;
/// assert_eq!(submit_time_window(1), "[NOW/DAY-1DAY TO NOW/DAY+1DAY}");
/// assert_eq!(submit_time_window(7), "[NOW/DAY-7DAYS TO NOW/DAY+1DAY}");
/// ```
pub fn submit_time_window(days_ago: u32) -> String {
    let plural = if days_ago > 1 { "S" } else { "" };
    format!("[NOW/DAY-{days_ago}DAY{plural} TO NOW/DAY+1DAY}}")
}

/// Builds the search query for transactions submitted in the last `days_ago` days. If `client_reference` is empty,
/// every transaction in the window matches.
pub fn build_search_query(client_reference: &str, days_ago: u32) -> String {
    let window = submit_time_window(days_ago);
    if client_reference.is_empty() {
        format!("submitTimeUtc:{window}")
    } else {
        format!("clientReferenceInformation.code:{client_reference} AND submitTimeUtc:{window}")
    }
}

/// A single page of a processor transaction search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub save: bool,
    pub name: String,
    pub timezone: String,
    pub query: String,
    pub offset: usize,
    pub limit: usize,
    pub sort: String,
}

impl SearchRequest {
    /// The first page of a search for `client_reference` over the last `days_ago` days.
    pub fn new(client_reference: &str, days_ago: u32) -> Self {
        Self {
            save: false,
            name: SEARCH_NAME.to_string(),
            timezone: SEARCH_TIMEZONE.to_string(),
            query: build_search_query(client_reference, days_ago),
            offset: 0,
            limit: PAGE_SIZE,
            sort: SEARCH_SORT.to_string(),
        }
    }

    /// The request for the page that follows this one.
    pub fn next_page(&self) -> Self {
        Self { offset: self.offset + self.limit, ..self.clone() }
    }
}

impl Display for SearchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' (offset {}, limit {})", self.query, self.offset, self.limit)
    }
}
