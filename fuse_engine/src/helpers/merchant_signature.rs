//! # Merchant signature format
//!
//! The gateway signs every payment notification it sends back to the merchant, so that the merchant can be sure that
//! the authorisation result (and the references that go with it) were not tampered with on the way through the
//! customer's browser.
//!
//! ## Message format
//!
//! The fields that take part in the signature are listed, in order, in the merchant's signed field configuration.
//! Each field is rendered as `name=value` and the pairs are joined with a comma:
//!
//! ```text
//!    AuthorisationResult=Authorised,PspReference=123,PaymentMethod=Card
//! ```
//!
//! There is no escaping, trimming or normalisation. The UTF-8 bytes of that string are signed with HMAC-SHA256, using
//! the UTF-8 bytes of the merchant's secret key string as the key (i.e. the key is *not* hex-decoded). The digest is
//! encoded as standard, padded base64 and posted in the `MerchantSignature` field.

use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use log::*;
use sha2::Sha256;
use thiserror::Error;

use crate::fuse_types::{NotificationParameters, SignedFieldSpec};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerchantSignatureError {
    #[error("The signed field '{0}' is missing from the notification")]
    MissingField(String),
    #[error("The signing key is not usable: {0}")]
    InvalidKey(String),
}

/// Builds the canonical string that the gateway signs.
pub fn signing_string(
    params: &NotificationParameters,
    spec: &SignedFieldSpec,
) -> Result<String, MerchantSignatureError> {
    let pairs = spec
        .fields()
        .map(|name| {
            params
                .get(name)
                .map(|value| format!("{name}={value}"))
                .ok_or_else(|| MerchantSignatureError::MissingField(name.to_string()))
        })
        .collect::<Result<Vec<String>, _>>()?;
    Ok(pairs.join(","))
}

/// Calculates the base64-encoded signature the gateway would have produced for these parameters.
pub fn calculate_merchant_signature(
    params: &NotificationParameters,
    spec: &SignedFieldSpec,
    key: &[u8],
) -> Result<String, MerchantSignatureError> {
    if key.is_empty() {
        return Err(MerchantSignatureError::InvalidKey("the key is empty".into()));
    }
    let message = signing_string(params, spec)?;
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| MerchantSignatureError::InvalidKey(e.to_string()))?;
    mac.update(message.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Returns true if, and only if, `presented` is the signature of the parameters under the given field spec and key.
///
/// A missing field, or an empty key, is treated exactly like a mismatch. The signature field itself must already have been removed
/// from `params`.
pub fn verify_merchant_signature(
    params: &NotificationParameters,
    spec: &SignedFieldSpec,
    presented: &str,
    key: &[u8],
) -> bool {
    match calculate_merchant_signature(params, spec, key) {
        Ok(expected) => {
            let valid = constant_time_eq(expected.as_bytes(), presented.as_bytes());
            if valid {
                trace!("🔏️ Merchant signature check ✅️");
            } else {
                debug!("🔏️ Merchant signature does not match the notification");
            }
            valid
        },
        Err(e) => {
            debug!("🔏️ Could not calculate merchant signature. {e}");
            false
        },
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
