use std::{env, fmt::Display, str::FromStr, time::Duration};

use cybersource_tools::CybersourceConfig;
use fuse_common::{helpers::split_comma_list, Secret};
use fuse_engine::{
    fuse_api::{refund_api::DEFAULT_SEARCH_DAYS, search_api::DEFAULT_MAX_PAGES},
    fuse_types::SignedFieldSpec,
};
use log::*;

const DEFAULT_FUSE_HOST: &str = "127.0.0.1";
const DEFAULT_FUSE_PORT: u16 = 8370;
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SIGNED_FIELD_NAMES: &str = "AuthorisationResult,PspReference,MerchantReference,PaymentMethod";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// The key the gateway uses to sign payment notifications.
    pub secret_key: Secret<String>,
    /// The notification fields covered by the merchant signature, in signing order.
    pub signed_fields: SignedFieldSpec,
    pub ledger: LedgerConfig,
    pub cybersource: CybersourceConfig,
    /// How far back (in days) refunds look when they have to fall back on a transaction search.
    pub search_days: u32,
    /// Upper bound on the number of result pages a single transaction search will fetch.
    pub search_max_pages: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_FUSE_HOST.to_string(),
            port: DEFAULT_FUSE_PORT,
            secret_key: Secret::default(),
            signed_fields: default_signed_fields(),
            ledger: LedgerConfig::default(),
            cybersource: CybersourceConfig::default(),
            search_days: DEFAULT_SEARCH_DAYS,
            search_max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LedgerConfig {
    /// The base url of the merchant ledger, e.g. `https://ledger.example.com`.
    pub url: String,
    /// Sent as a bearer token when present.
    pub api_key: Option<Secret<String>>,
    pub timeout: Duration,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { url: String::default(), api_key: None, timeout: DEFAULT_HTTP_TIMEOUT }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("FUSE_HOST").ok().unwrap_or_else(|| DEFAULT_FUSE_HOST.into());
        let port = parse_env_or_default("FUSE_PORT", DEFAULT_FUSE_PORT);
        let secret_key = env::var("FUSE_SECRET_KEY").map(Secret::new).unwrap_or_else(|_| {
            error!("🪛️ FUSE_SECRET_KEY is not set. The server will refuse to start.");
            Secret::default()
        });
        let signed_fields = env::var("FUSE_SIGNED_FIELD_NAMES")
            .ok()
            .map(|s| SignedFieldSpec::new(split_comma_list(&s)))
            .filter(|spec| !spec.is_empty())
            .unwrap_or_else(|| {
                info!("🪛️ FUSE_SIGNED_FIELD_NAMES is not set. Using the default, {DEFAULT_SIGNED_FIELD_NAMES}.");
                default_signed_fields()
            });
        let timeout = Duration::from_secs(parse_env_or_default("FUSE_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT.as_secs()));
        let ledger = LedgerConfig::from_env_or_default(timeout);
        let cybersource = CybersourceConfig::new_from_env_or_default().with_timeout(timeout);
        let search_days = parse_env_or_default("FUSE_SEARCH_DAYS", DEFAULT_SEARCH_DAYS);
        let search_max_pages = parse_env_or_default("FUSE_SEARCH_MAX_PAGES", DEFAULT_MAX_PAGES);
        Self { host, port, secret_key, signed_fields, ledger, cybersource, search_days, search_max_pages }
    }
}

impl LedgerConfig {
    pub fn from_env_or_default(timeout: Duration) -> Self {
        let url = env::var("FUSE_LEDGER_URL").map(|s| s.trim_end_matches('/').to_string()).unwrap_or_else(|_| {
            error!("🪛️ FUSE_LEDGER_URL is not set. Please set it to the base URL of the merchant ledger.");
            String::default()
        });
        let api_key = env::var("FUSE_LEDGER_API_KEY").ok().filter(|s| !s.trim().is_empty()).map(Secret::new);
        if api_key.is_none() {
            info!("🪛️ FUSE_LEDGER_API_KEY is not set. Ledger requests will not be authenticated.");
        }
        Self { url, api_key, timeout }
    }
}

fn default_signed_fields() -> SignedFieldSpec {
    SignedFieldSpec::new(split_comma_list(DEFAULT_SIGNED_FIELD_NAMES))
}

fn parse_env_or_default<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(name) {
        Ok(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => default,
    }
}

/// Notification verification settings, shared with the payment-response handler.
#[derive(Clone, Debug)]
pub struct NotificationSettings {
    pub signed_fields: SignedFieldSpec,
    pub secret_key: Secret<String>,
}

impl From<&ServerConfig> for NotificationSettings {
    fn from(config: &ServerConfig) -> Self {
        Self { signed_fields: config.signed_fields.clone(), secret_key: config.secret_key.clone() }
    }
}

/// Request handling options that callers may override per request.
#[derive(Clone, Copy, Debug)]
pub struct ServerOptions {
    /// The default search window, in days, for transaction searches.
    pub search_days: u32,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { search_days: DEFAULT_SEARCH_DAYS }
    }
}

impl From<&ServerConfig> for ServerOptions {
    fn from(config: &ServerConfig) -> Self {
        Self { search_days: config.search_days }
    }
}
