use std::time::Duration;

use fuse_common::Secret;
use log::*;

pub const DEFAULT_CYBERSOURCE_HOST: &str = "apitest.cybersource.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct CybersourceConfig {
    /// The API host, without a scheme, e.g. `api.cybersource.com`.
    pub host: String,
    pub merchant_id: String,
    /// The id of the REST shared secret key.
    pub key_id: String,
    /// The base64-encoded REST shared secret.
    pub shared_secret: Secret<String>,
    pub timeout: Duration,
}

impl Default for CybersourceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_CYBERSOURCE_HOST.to_string(),
            merchant_id: String::default(),
            key_id: String::default(),
            shared_secret: Secret::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CybersourceConfig {
    pub fn new_from_env_or_default() -> Self {
        let host = std::env::var("FUSE_CYBERSOURCE_HOST").unwrap_or_else(|_| {
            warn!("FUSE_CYBERSOURCE_HOST not set, using the test environment ({DEFAULT_CYBERSOURCE_HOST})");
            DEFAULT_CYBERSOURCE_HOST.to_string()
        });
        let merchant_id = std::env::var("FUSE_CYBERSOURCE_MERCHANT_ID").unwrap_or_else(|_| {
            warn!("FUSE_CYBERSOURCE_MERCHANT_ID not set, using (probably useless) default");
            "test_merchant".to_string()
        });
        let key_id = std::env::var("FUSE_CYBERSOURCE_KEY_ID").unwrap_or_else(|_| {
            warn!("FUSE_CYBERSOURCE_KEY_ID not set, using (probably useless) default");
            "00000000-0000-0000-0000-000000000000".to_string()
        });
        let shared_secret = Secret::new(std::env::var("FUSE_CYBERSOURCE_SHARED_SECRET").unwrap_or_else(|_| {
            warn!("FUSE_CYBERSOURCE_SHARED_SECRET not set, using (probably useless) default");
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".to_string()
        }));
        Self { host, merchant_id, key_id, shared_secret, timeout: DEFAULT_TIMEOUT }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
