mod api;
mod config;
mod data_objects;
mod error;
mod http_signature;

pub use api::CybersourceApi;
pub use config::CybersourceConfig;
pub use data_objects::{
    AmountDetails,
    ApplicationInformation,
    ApplicationSummary,
    CardSummary,
    ClientReferenceInformation,
    CreateSearchRequest,
    EmbeddedTransactions,
    ErrorInformation,
    OrderInformation,
    PaymentInformation,
    ProcessorInformation,
    RefundPaymentRequest,
    RefundPaymentResponse,
    SearchResponse,
    TransactionSummary,
};
pub use error::CybersourceApiError;
pub use http_signature::{generate_digest, http_date, HttpSignature};
