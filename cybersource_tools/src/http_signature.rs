//! HTTP Signature authentication for the Cybersource REST API.
//!
//! Every request carries a `Signature` header: an HMAC-SHA256 over a canonical list of request headers, keyed with
//! the (base64-decoded) REST shared secret. Requests with a body also carry a `Digest` header holding the SHA-256 of
//! the body, which is itself one of the signed headers.
//!
//! ```text
//!    host: apitest.cybersource.com
//!    date: Wed, 01 May 2024 12:00:00 GMT
//!    (request-target): post /pts/v2/payments/123/refunds
//!    digest: SHA-256={base64 body hash}
//!    v-c-merchant-id: {merchant id}
//! ```

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use fuse_common::Secret;
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::{Digest, Sha256};

use crate::CybersourceApiError;

type HmacSha256 = Hmac<Sha256>;

/// The base64-encoded SHA-256 hash of a request body.
pub fn generate_digest(payload: &[u8]) -> String {
    STANDARD.encode(Sha256::digest(payload))
}

/// Formats a timestamp the way the `Date` header expects it (RFC 7231).
pub fn http_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn has_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

#[derive(Debug, Clone)]
pub struct HttpSignature {
    key_id: String,
    merchant_id: String,
    key: Secret<Vec<u8>>,
}

impl HttpSignature {
    pub fn new(key_id: &str, merchant_id: &str, shared_secret: &Secret<String>) -> Result<Self, CybersourceApiError> {
        let key = STANDARD
            .decode(shared_secret.reveal().trim())
            .map_err(|e| CybersourceApiError::InvalidSharedSecret(e.to_string()))?;
        Ok(Self { key_id: key_id.to_string(), merchant_id: merchant_id.to_string(), key: Secret::new(key) })
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// The list of signed headers, in signing order.
    pub fn signed_headers(method: &Method) -> &'static str {
        if has_body(method) {
            "host date (request-target) digest v-c-merchant-id"
        } else {
            "host date (request-target) v-c-merchant-id"
        }
    }

    pub fn signing_string(&self, host: &str, date: &str, method: &Method, resource: &str, digest: &str) -> String {
        let method_name = method.as_str().to_lowercase();
        let digest_line =
            if has_body(method) { format!("digest: SHA-256={digest}\n") } else { String::default() };
        format!(
            "host: {host}\ndate: {date}\n(request-target): {method_name} {resource}\n{digest_line}v-c-merchant-id: {}",
            self.merchant_id
        )
    }

    /// Builds the value of the `Signature` header. `digest` is ignored for methods that carry no body.
    pub fn signature_header(
        &self,
        host: &str,
        date: &str,
        method: &Method,
        resource: &str,
        digest: &str,
    ) -> Result<String, CybersourceApiError> {
        let message = self.signing_string(host, date, method, resource, digest);
        let mut mac = HmacSha256::new_from_slice(self.key.reveal())
            .map_err(|e| CybersourceApiError::InvalidSharedSecret(e.to_string()))?;
        mac.update(message.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());
        let headers = Self::signed_headers(method);
        Ok(format!(r#"keyid="{}", algorithm="HmacSHA256", headers="{headers}", signature="{signature}""#, self.key_id))
    }
}
