use std::sync::Arc;

use chrono::Utc;
use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE},
    Client,
    Method,
    Url,
};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::CybersourceConfig,
    data_objects::{CreateSearchRequest, RefundPaymentRequest, RefundPaymentResponse, SearchResponse},
    http_signature::{generate_digest, http_date, HttpSignature},
    CybersourceApiError,
};

#[derive(Clone)]
pub struct CybersourceApi {
    config: CybersourceConfig,
    signer: HttpSignature,
    client: Arc<Client>,
}

impl CybersourceApi {
    pub fn new(config: CybersourceConfig) -> Result<Self, CybersourceApiError> {
        let signer = HttpSignature::new(&config.key_id, &config.merchant_id, &config.shared_secret)?;
        let mut headers = HeaderMap::with_capacity(3);
        let val = HeaderValue::from_str(&config.merchant_id)
            .map_err(|e| CybersourceApiError::Initialization(e.to_string()))?;
        headers.insert("v-c-merchant-id", val);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/hal+json;charset=utf-8"));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CybersourceApiError::Initialization(e.to_string()))?;
        Ok(Self { config, signer, client: Arc::new(client) })
    }

    pub fn url(&self, path: &str) -> String {
        format!("https://{}{path}", self.config.host)
    }

    pub fn config(&self) -> &CybersourceConfig {
        &self.config
    }

    /// Sends a signed request to the Cybersource REST API and deserializes the JSON response.
    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, CybersourceApiError> {
        let url = self.url(path);
        let payload = match body {
            Some(b) => serde_json::to_vec(b).map_err(|e| CybersourceApiError::RestRequestError(e.to_string()))?,
            None => Vec::new(),
        };
        let digest = generate_digest(&payload);
        let date = http_date(Utc::now());
        let signature = self.signer.signature_header(&self.config.host, &date, &method, path, &digest)?;
        trace!("Sending REST query: {method} {url}");
        let mut req = self
            .client
            .request(method.clone(), url)
            .header("Date", date)
            .header("Signature", signature);
        if matches!(method, Method::POST | Method::PUT | Method::PATCH) {
            req = req.header("Digest", format!("SHA-256={digest}")).body(payload);
        }
        let response = req.send().await.map_err(|e| CybersourceApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| CybersourceApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| CybersourceApiError::RestResponseError(e.to_string()))?;
            Err(CybersourceApiError::QueryError { status, message })
        }
    }

    /// Requests a refund of `amount` (GBP) against the captured transaction `transaction_id`.
    pub async fn refund_payment(
        &self,
        client_reference: &str,
        transaction_id: &str,
        amount: Decimal,
    ) -> Result<RefundPaymentResponse, CybersourceApiError> {
        let path = resource_path(&["pts", "v2", "payments", transaction_id, "refunds"])?;
        let body = RefundPaymentRequest::new(client_reference, amount);
        debug!("Requesting refund of {amount} against transaction {transaction_id} for {client_reference}");
        let result = self.rest_query::<RefundPaymentResponse, _>(Method::POST, &path, Some(&body)).await?;
        info!("Refund {} against transaction {transaction_id} has status {}", result.id, result.status);
        Ok(result)
    }

    /// Runs a transaction search and returns the requested page of results.
    pub async fn create_search(&self, request: &CreateSearchRequest) -> Result<SearchResponse, CybersourceApiError> {
        debug!("Searching transactions: '{}' (offset {})", request.query, request.offset);
        let result = self.rest_query::<SearchResponse, _>(Method::POST, "/tss/v2/searches", Some(request)).await?;
        debug!("Search returned {} of {} transactions", result.transaction_summaries().len(), result.total_count);
        Ok(result)
    }
}

/// Joins `segments` into an absolute request path. Each segment is percent-encoded so that it remains exactly one path
/// segment, and the encoded path is what gets signed.
pub fn resource_path(segments: &[&str]) -> Result<String, CybersourceApiError> {
    if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
        return Err(CybersourceApiError::RestRequestError(format!("'{bad}' is not a valid path segment")));
    }
    let mut url = Url::parse("https://localhost/").map_err(|e| CybersourceApiError::RestRequestError(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| CybersourceApiError::RestRequestError("Cannot build a request path".into()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}
