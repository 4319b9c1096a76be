use std::sync::Arc;

use reqwest::Client as ReqwestClient;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use secrecy::SecretString;
use url::Url;

use crate::Result;
use crate::card_storage::{
    CardStorage, CardStorageResponse, SecretKind, ServiceReply, SignedRequest,
};
use crate::clock::Clock;
use crate::config::{Config, ConfigOption};
use crate::error::Exchange;

const XML_CONTENT_TYPE: &str = "application/xml";

/// Client for the gateway's remote XML API.
///
/// Immutable once built; clones share the underlying HTTP client and can be
/// used from many tasks at once.
#[derive(Clone, Debug)]
pub struct Client {
    base_url: Url,
    merchant_id: String,
    shared_secret: SecretString,
    rebate_secret: SecretString,
    service_path: String,
    http: ReqwestClient,
    clock: Arc<dyn Clock>,
}

impl Client {
    /// Builds a client from the sandbox defaults with `options` applied in order.
    pub fn new<I>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        Self::from_config(Config::with_options(options))
    }

    /// Client against the sandbox with the published test credentials.
    pub fn sandbox() -> Result<Self> {
        Self::from_config(Config::default())
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let base_url = config.parse_base_url()?;
        // The service path must resolve against the base URL.
        base_url.join(&config.service_path)?;

        Ok(Self {
            base_url,
            merchant_id: config.merchant_id,
            shared_secret: config.shared_secret,
            rebate_secret: config.rebate_secret,
            service_path: config.service_path,
            http: config.http_client.unwrap_or_default(),
            clock: config.clock,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    #[must_use]
    pub fn service_path(&self) -> &str {
        &self.service_path
    }

    /// Card storage operations, posted to the configured service path.
    #[must_use]
    pub fn card_storage(&self) -> CardStorage<'_> {
        CardStorage::new(self, &self.service_path)
    }

    pub(crate) fn timestamp(&self) -> String {
        self.clock.timestamp()
    }

    pub(crate) fn secret(&self, kind: SecretKind) -> &SecretString {
        match kind {
            SecretKind::Shared => &self.shared_secret,
            SecretKind::Rebate => &self.rebate_secret,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Posts `request` to `path`, decodes the reply and verifies its signature.
    ///
    /// Transport and decoding failures are returned as is. A reply whose
    /// signature does not verify is dropped and reported as an integrity
    /// error carrying the exchange's method, path and status.
    pub(crate) async fn transmit(
        &self,
        path: &str,
        request: &SignedRequest<'_>,
    ) -> Result<ServiceReply> {
        let body = request.to_xml()?;
        let http_request = self
            .http
            .request(Method::POST, self.endpoint(path)?)
            .header(CONTENT_TYPE, XML_CONTENT_TYPE)
            .body(body)
            .build()?;

        let method = http_request.method().clone();
        let url_path = http_request.url().path().to_owned();

        #[cfg(feature = "tracing")]
        tracing::debug!(operation = %request.operation(), path = %url_path, "sending request");

        let http_response = self.http.execute(http_request).await?;
        let status = http_response.status();
        let text = http_response.text().await?;
        let exchange = Exchange::new(method, url_path, status);

        let response = CardStorageResponse::from_xml(&text)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            operation = %request.operation(),
            status = %exchange.status,
            result = %response.result,
            "received response"
        );

        if let Err(e) = response.validate_signature(&self.shared_secret, &exchange) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                operation = %request.operation(),
                path = %exchange.path,
                status = %exchange.status,
                "response signature mismatch"
            );
            return Err(e);
        }

        Ok(ServiceReply::new(response, exchange))
    }
}
