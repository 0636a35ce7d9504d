use std::{
    collections::HashMap,
    convert::Infallible,
    fmt::Display,
    str::FromStr,
};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Field names used by the gateway in payment notifications.
pub mod param_keys {
    pub const AUTHORISATION_RESULT: &str = "AuthorisationResult";
    pub const MERCHANT_SIGNATURE: &str = "MerchantSignature";
    pub const MERCHANT_REFERENCE: &str = "MerchantReference";
    pub const PSP_REFERENCE: &str = "PspReference";
    pub const PAYMENT_METHOD: &str = "PaymentMethod";
}

//--------------------------------------   NotificationParameters  ---------------------------------------------------
/// The raw fields of a payment notification, exactly as the gateway posted them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationParameters(HashMap<String, String>);

impl NotificationParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes the field from the notification and returns its value.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for NotificationParameters {
    fn from(value: HashMap<String, String>) -> Self {
        Self(value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for NotificationParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

//--------------------------------------     SignedFieldSpec       ---------------------------------------------------
/// The ordered list of notification fields that take part in the merchant signature.
///
/// On the wire this is a comma-delimited string. The order is significant. The list comes from the settlement
/// context (i.e. server configuration), never from the notification itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedFieldSpec(Vec<String>);

impl SignedFieldSpec {
    pub fn new<S: Into<String>>(fields: Vec<S>) -> Self {
        Self(fields.into_iter().map(Into::into).collect())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for SignedFieldSpec {
    type Err = Infallible;

    /// Splits on `,` with no trimming. A name that does not exist in the notification simply fails verification.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.split(',').map(String::from).collect()))
    }
}

impl Display for SignedFieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(","))
    }
}

//--------------------------------------        AuthResult         ---------------------------------------------------
/// The settlement outcome that the ledger understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthResult {
    Authorised,
    Refused,
    Cancelled,
    Error,
}

impl AuthResult {
    /// Maps the gateway's authorisation result onto a settlement outcome.
    ///
    /// The match is exact and case-sensitive. Every code the gateway might send, including the empty string, is a
    /// valid input: anything unrecognised settles as [`AuthResult::Error`].
    pub fn classify(code: &str) -> Self {
        match code {
            "Authorised" => Self::Authorised,
            "Declined" => Self::Refused,
            "Cancelled" => Self::Cancelled,
            _ => Self::Error,
        }
    }
}

impl Display for AuthResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Authorised => write!(f, "Authorised"),
            Self::Refused => write!(f, "Refused"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Error => write!(f, "Error"),
        }
    }
}

//--------------------------------------   ProcessPaymentModel     ---------------------------------------------------
/// The normalized settlement record submitted to the ledger for every verified notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessPaymentModel {
    pub auth_result: AuthResult,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub psp_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub merchant_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub payment_method: Option<String>,
}

impl ProcessPaymentModel {
    /// Builds the record for the given outcome. Only authorised payments carry the processor reference and payment
    /// method; every other outcome carries the merchant reference alone.
    pub fn from_notification(auth_result: AuthResult, params: &NotificationParameters) -> Self {
        let merchant_reference = params.get(param_keys::MERCHANT_REFERENCE).map(String::from);
        match auth_result {
            AuthResult::Authorised => Self {
                auth_result,
                psp_reference: params.get(param_keys::PSP_REFERENCE).map(String::from),
                merchant_reference,
                payment_method: params.get(param_keys::PAYMENT_METHOD).map(String::from),
            },
            AuthResult::Refused | AuthResult::Cancelled | AuthResult::Error => {
                Self { auth_result, psp_reference: None, merchant_reference, payment_method: None }
            },
        }
    }
}

/// The ledger's acknowledgement of a processed payment. The engine does not interpret it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessPaymentResponseModel(pub serde_json::Value);

//--------------------------------------          Refund           ---------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    /// The merchant reference of the payment being refunded.
    pub reference: String,
    pub amount: Decimal,
}

impl Refund {
    pub fn new<S: Into<String>>(reference: S, amount: Decimal) -> Self {
        Self { reference: reference.into(), amount }
    }
}

impl Display for Refund {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} for {}", self.reference, self.amount)
    }
}

//--------------------------------------       RefundResult        ---------------------------------------------------
/// The outcome of a refund request.
///
/// Use [`RefundResult::successful`] or [`RefundResult::failure`] to construct one. A successful result always carries
/// the requested amount and never a reason; a failed one carries a reason and never an amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundResult {
    succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    failure_reason: Option<String>,
}

impl RefundResult {
    pub fn successful<S: Into<String>>(reference: S, amount: Decimal) -> Self {
        Self { succeeded: true, reference: Some(reference.into()), amount: Some(amount), failure_reason: None }
    }

    pub fn failure<S: Into<String>>(reason: S) -> Self {
        Self { succeeded: false, reference: None, amount: None, failure_reason: Some(reason.into()) }
    }

    pub fn succeeded(&self) -> bool {
        self.succeeded
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }
}

//--------------------------------------       RefundStatus        ---------------------------------------------------
/// The status a processor reports for a refund request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundStatus {
    Pending,
    Succeeded,
    Transmitted,
    Failed,
    Voided,
    Cancelled,
    Other(String),
}

impl RefundStatus {
    pub fn from_processor_code(code: &str) -> Self {
        match code {
            "PENDING" => Self::Pending,
            "SUCCEEDED" => Self::Succeeded,
            "TRANSMITTED" => Self::Transmitted,
            "FAILED" => Self::Failed,
            "VOIDED" => Self::Voided,
            "CANCELLED" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }

    /// Only a pending refund counts as accepted. Other statuses may well be terminal successes in the processor's
    /// status machine, but that is unconfirmed, so they are reported as failures.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl Display for RefundStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Succeeded => write!(f, "SUCCEEDED"),
            Self::Transmitted => write!(f, "TRANSMITTED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Voided => write!(f, "VOIDED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

//--------------------------------------   ProcessedTransaction    ---------------------------------------------------
/// A processor transaction that the ledger has recorded against a merchant reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedTransaction {
    pub psp_reference: String,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
}

impl ProcessedTransaction {
    pub fn new<S: Into<String>>(psp_reference: S) -> Self {
        Self { psp_reference: psp_reference.into(), created_date: None }
    }

    pub fn with_created_date(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = Some(created_date);
        self
    }
}

//--------------------------------------    TransactionSummary     ---------------------------------------------------
/// A processor-side transaction, as returned by the processor's transaction search, reduced to the fields the engine
/// reasons about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSummary {
    /// The processor's transaction id.
    pub id: String,
    pub client_reference: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub approval_code: Option<String>,
    pub amount: Decimal,
    pub card_prefix: Option<String>,
    pub card_suffix: Option<String>,
    /// True if the processor reports that the funds have been captured.
    pub captured: bool,
}

impl TransactionSummary {
    /// An approval code is the only evidence of a successful authorisation that the search results carry.
    pub fn is_authorised(&self) -> bool {
        self.approval_code.as_deref().map(|c| !c.trim().is_empty()).unwrap_or(false)
    }
}

//--------------------------------------          Payment          ---------------------------------------------------
/// A reconciliation record built from a processor transaction.
///
/// `identifier` is generated when the record is built. Searching for the same processor transaction twice produces
/// two different identifiers; use `reference` to recognise the same transaction across searches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub identifier: Uuid,
    /// The processor's transaction id.
    pub reference: String,
    /// The merchant's (client) reference.
    pub payment_id: String,
    pub amount: Decimal,
    pub created_date: DateTime<Utc>,
    /// True once the processor reports the funds as captured.
    pub captured: bool,
    /// Transaction searches do not report when a capture happened, so records built from them leave this empty.
    pub captured_date: Option<DateTime<Utc>>,
    pub card_prefix: Option<String>,
    pub card_suffix: Option<String>,
}

impl From<&TransactionSummary> for Payment {
    fn from(tx: &TransactionSummary) -> Self {
        Self {
            identifier: Uuid::new_v4(),
            reference: tx.id.clone(),
            payment_id: tx.client_reference.clone().unwrap_or_default(),
            amount: tx.amount,
            created_date: tx.submitted_at,
            captured: tx.captured,
            captured_date: None,
            card_prefix: tx.card_prefix.clone(),
            card_suffix: tx.card_suffix.clone(),
        }
    }
}
