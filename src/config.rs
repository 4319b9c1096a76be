use std::sync::Arc;

use reqwest::Client as ReqwestClient;
use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::clock::{Clock, SystemClock};
use crate::error::Error;

/// Sandbox endpoint of the remote API.
pub const DEFAULT_BASE_URL: &str = "https://test.realexpayments.com";
pub const DEFAULT_MERCHANT_ID: &str = "realexsandbox";
pub const DEFAULT_SHARED_SECRET: &str = "Po8lRRT67a";
pub const DEFAULT_REBATE_SECRET: &str = "Po8lRRT67a";
pub const DEFAULT_SERVICE_PATH: &str = "/epage-remote.cgi";

/// Client configuration. [`Config::default`] points at the sandbox.
#[derive(Clone, Debug)]
pub struct Config {
    /// Scheme and host, without a trailing `/`.
    pub base_url: String,
    pub merchant_id: String,
    pub shared_secret: SecretString,
    /// Secret for payouts (`payment-out`).
    pub rebate_secret: SecretString,
    pub service_path: String,
    pub http_client: Option<ReqwestClient>,
    pub clock: Arc<dyn Clock>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            merchant_id: DEFAULT_MERCHANT_ID.to_owned(),
            shared_secret: SecretString::from(DEFAULT_SHARED_SECRET.to_owned()),
            rebate_secret: SecretString::from(DEFAULT_REBATE_SECRET.to_owned()),
            service_path: DEFAULT_SERVICE_PATH.to_owned(),
            http_client: None,
            clock: Arc::new(SystemClock),
        }
    }
}

impl Config {
    /// Applies `options` in order on top of the defaults.
    pub fn with_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let mut config = Self::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    pub(crate) fn parse_base_url(&self) -> Result<Url> {
        if self.base_url.ends_with('/') {
            return Err(Error::configuration(format!(
                "base URL {:?} contains a trailing slash",
                self.base_url
            )));
        }
        let url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "base URL {:?} cannot be used as a base",
                self.base_url
            )));
        }
        Ok(url)
    }
}

/// A single configuration change, applied after the defaults and before
/// validation.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum ConfigOption {
    BaseUrl(String),
    MerchantId(String),
    SharedSecret(SecretString),
    RebateSecret(SecretString),
    ServicePath(String),
    HttpClient(ReqwestClient),
    Clock(Arc<dyn Clock>),
}

impl ConfigOption {
    pub fn base_url<S: Into<String>>(url: S) -> Self {
        ConfigOption::BaseUrl(url.into())
    }

    pub fn merchant_id<S: Into<String>>(merchant_id: S) -> Self {
        ConfigOption::MerchantId(merchant_id.into())
    }

    pub fn shared_secret<S: Into<String>>(secret: S) -> Self {
        ConfigOption::SharedSecret(SecretString::from(secret.into()))
    }

    pub fn rebate_secret<S: Into<String>>(secret: S) -> Self {
        ConfigOption::RebateSecret(SecretString::from(secret.into()))
    }

    pub fn service_path<S: Into<String>>(path: S) -> Self {
        ConfigOption::ServicePath(path.into())
    }

    /// Sends requests through `client` instead of a default one.
    pub fn http_client(client: ReqwestClient) -> Self {
        ConfigOption::HttpClient(client)
    }

    pub fn clock<C: Clock + 'static>(clock: C) -> Self {
        ConfigOption::Clock(Arc::new(clock))
    }

    fn apply(self, config: &mut Config) {
        match self {
            ConfigOption::BaseUrl(url) => config.base_url = url,
            ConfigOption::MerchantId(merchant_id) => config.merchant_id = merchant_id,
            ConfigOption::SharedSecret(secret) => config.shared_secret = secret,
            ConfigOption::RebateSecret(secret) => config.rebate_secret = secret,
            ConfigOption::ServicePath(path) => config.service_path = path,
            ConfigOption::HttpClient(client) => config.http_client = Some(client),
            ConfigOption::Clock(clock) => config.clock = clock,
        }
    }
}
