use std::sync::Arc;

use fuse_engine::{
    fuse_types::{ProcessPaymentModel, ProcessPaymentResponseModel, ProcessedTransaction},
    LedgerError,
    LedgerManagement,
};
use log::*;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{config::LedgerConfig, errors::ServerError};

/// REST client for the merchant ledger's payment request API.
#[derive(Clone)]
pub struct LedgerClient {
    config: LedgerConfig,
    base_url: Url,
    client: Arc<Client>,
}

impl LedgerClient {
    pub fn new(config: LedgerConfig) -> Result<Self, ServerError> {
        if config.url.is_empty() {
            return Err(ServerError::ConfigurationError("The ledger URL has not been set".into()));
        }
        let base_url = Url::parse(&config.url)
            .map_err(|e| ServerError::ConfigurationError(format!("Invalid ledger URL {}. {e}", config.url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ServerError::ConfigurationError(format!("{} cannot be used as a base URL", config.url)));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ServerError::InitializeError(format!("Could not create the ledger client. {e}")))?;
        Ok(Self { config, base_url, client: Arc::new(client) })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// `{ledger}/api/v1/paymentrequests/{reference}/{action}`. The reference is always a single, percent-encoded path
    /// segment.
    pub fn url(&self, reference: &str, action: &str) -> Result<Url, LedgerError> {
        if reference == "." || reference == ".." {
            return Err(LedgerError::InvalidReference(reference.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LedgerError::InvalidReference(reference.to_string()))?
            .pop_if_empty()
            .extend(["api", "v1", "paymentrequests", reference, action]);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.client.request(method, url);
        match &self.config.api_key {
            Some(key) => req.bearer_auth(key.reveal()),
            None => req,
        }
    }

    async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, LedgerError> {
        trace!("Sending ledger request: {method} {url}");
        let mut req = self.request(method, url);
        if let Some(body) = body {
            req = req.json(body);
        }
        let response = req.send().await.map_err(|e| LedgerError::Transport(e.to_string()))?;
        if response.status().is_success() {
            response.json::<T>().await.map_err(|e| LedgerError::InvalidResponse(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| LedgerError::Transport(e.to_string()))?;
            Err(LedgerError::Rejected { status, message })
        }
    }
}

impl LedgerManagement for LedgerClient {
    async fn process_payment(
        &self,
        merchant_reference: &str,
        model: &ProcessPaymentModel,
    ) -> Result<ProcessPaymentResponseModel, LedgerError> {
        let url = self.url(merchant_reference, "process")?;
        debug!("🧾️ Reporting {} for {merchant_reference} to the ledger", model.auth_result);
        self.rest_query(Method::POST, url, Some(model)).await
    }

    async fn fetch_processed_transactions(
        &self,
        merchant_reference: &str,
    ) -> Result<Vec<ProcessedTransaction>, LedgerError> {
        let url = self.url(merchant_reference, "processedTransactions")?;
        self.rest_query::<Vec<ProcessedTransaction>, ()>(Method::GET, url, None).await
    }
}
