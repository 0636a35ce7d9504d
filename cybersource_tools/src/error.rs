use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CybersourceApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("The shared secret is not valid base64: {0}")]
    InvalidSharedSecret(String),
    #[error("Invalid REST request: {0}")]
    RestRequestError(String),
    #[error("Invalid REST response: {0}")]
    RestResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Invalid currency amount: {0}")]
    InvalidCurrencyAmount(String),
}
