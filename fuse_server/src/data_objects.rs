use fuse_engine::fuse_types::Payment;
use serde::{Deserialize, Serialize};

/// Query parameters for `/payments/uncaptured`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncapturedPaymentsQuery {
    /// The merchant (client) reference to search for.
    pub reference: String,
    /// The size of the search window. The server's configured window is used when omitted.
    pub days_ago: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncapturedPaymentsResponse {
    pub reference: String,
    pub days_ago: u32,
    pub payments: Vec<Payment>,
}
