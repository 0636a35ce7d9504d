use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use fuse_engine::{LedgerError, NotificationError, RefundApiError, SearchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    PaymentValidation(String),
    #[error("Invalid refund request. {0}")]
    InvalidRefund(String),
    #[error("An upstream service failed. {0}")]
    Upstream(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::PaymentValidation(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRefund(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .body(serde_json::json!({ "error": self.to_string() }).to_string())
    }
}

impl From<NotificationError> for ServerError {
    fn from(e: NotificationError) -> Self {
        match e {
            NotificationError::PaymentValidation(msg) => Self::PaymentValidation(msg),
            NotificationError::Ledger(e) => Self::from(e),
        }
    }
}

impl From<RefundApiError> for ServerError {
    fn from(e: RefundApiError) -> Self {
        match e {
            RefundApiError::InvalidRefund(msg) => Self::InvalidRefund(msg),
            RefundApiError::Ledger(e) => Self::from(e),
            RefundApiError::Processor(e) => Self::Upstream(e.to_string()),
        }
    }
}

impl From<SearchError> for ServerError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::Upstream(e) => Self::Upstream(e.to_string()),
        }
    }
}

impl From<LedgerError> for ServerError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::InvalidReference(_) => Self::InvalidRequestBody(e.to_string()),
            e => Self::Upstream(e.to_string()),
        }
    }
}
