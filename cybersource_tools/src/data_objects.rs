use chrono::{DateTime, Utc};
use fuse_common::{format_amount, GBP_CURRENCY_CODE};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

//--------------------------------------           Refunds          --------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientReferenceInformation {
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub application_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountDetails {
    /// Amounts travel as decimal strings, with `.` as the separator.
    pub total_amount: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInformation {
    pub amount_details: Option<AmountDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundPaymentRequest {
    pub client_reference_information: ClientReferenceInformation,
    pub order_information: OrderInformation,
}

impl RefundPaymentRequest {
    /// A refund in pounds sterling, tagged with the merchant's reference.
    pub fn new(client_reference: &str, amount: Decimal) -> Self {
        Self {
            client_reference_information: ClientReferenceInformation {
                code: Some(client_reference.to_string()),
                application_name: None,
            },
            order_information: OrderInformation {
                amount_details: Some(AmountDetails {
                    total_amount: Some(format_amount(amount)),
                    currency: Some(GBP_CURRENCY_CODE.to_string()),
                }),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInformation {
    pub reason: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundPaymentResponse {
    pub id: String,
    /// One of `PENDING`, `SUCCEEDED`, `TRANSMITTED`, `FAILED`, `VOIDED` or `CANCELLED`. Kept as a string so that
    /// statuses this client doesn't know about still come through.
    pub status: String,
    pub submit_time_utc: Option<DateTime<Utc>>,
    pub error_information: Option<ErrorInformation>,
}

//--------------------------------------       Transaction search       ----------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSearchRequest {
    pub save: bool,
    pub name: String,
    pub timezone: String,
    pub query: String,
    pub offset: usize,
    pub limit: usize,
    pub sort: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub search_id: Option<String>,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub total_count: usize,
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<EmbeddedTransactions>,
}

impl SearchResponse {
    pub fn transaction_summaries(&self) -> &[TransactionSummary] {
        self.embedded.as_ref().map(|e| e.transaction_summaries.as_slice()).unwrap_or_default()
    }

    pub fn into_transaction_summaries(self) -> Vec<TransactionSummary> {
        self.embedded.map(|e| e.transaction_summaries).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedTransactions {
    #[serde(default)]
    pub transaction_summaries: Vec<TransactionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: String,
    pub submit_time_utc: DateTime<Utc>,
    pub merchant_id: Option<String>,
    pub application_information: Option<ApplicationInformation>,
    pub client_reference_information: Option<ClientReferenceInformation>,
    pub order_information: Option<OrderInformation>,
    pub payment_information: Option<PaymentInformation>,
    pub processor_information: Option<ProcessorInformation>,
}

/// The name of the application that records a capture (settlement) against a transaction.
pub const CAPTURE_APPLICATION: &str = "ics_bill";

impl TransactionSummary {
    pub fn client_reference(&self) -> Option<&str> {
        self.client_reference_information.as_ref().and_then(|c| c.code.as_deref())
    }

    pub fn approval_code(&self) -> Option<&str> {
        self.processor_information.as_ref().and_then(|p| p.approval_code.as_deref())
    }

    pub fn total_amount(&self) -> Option<&str> {
        self.order_information
            .as_ref()
            .and_then(|o| o.amount_details.as_ref())
            .and_then(|a| a.total_amount.as_deref())
    }

    pub fn card(&self) -> Option<&CardSummary> {
        self.payment_information.as_ref().and_then(|p| p.card.as_ref())
    }

    /// True if any of the applications run against this transaction was a capture.
    pub fn is_captured(&self) -> bool {
        self.application_information
            .as_ref()
            .map(|a| a.applications.iter().any(|app| app.name.as_deref() == Some(CAPTURE_APPLICATION)))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInformation {
    pub reason_code: Option<String>,
    #[serde(default)]
    pub applications: Vec<ApplicationSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub name: Option<String>,
    pub reason_code: Option<String>,
    pub r_flag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInformation {
    pub card: Option<CardSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorInformation {
    pub approval_code: Option<String>,
}
