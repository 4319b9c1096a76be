use std::error::Error as StdError;
use std::fmt;

use reqwest::{Method, StatusCode};

use crate::card_storage::Outcome;

/// Broad category of an [`Error`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Connection, DNS, TLS or HTTP protocol failure.
    Transport,
    /// The request could not be serialized; nothing was sent.
    Encoding,
    /// The response body could not be parsed.
    Decoding,
    /// The response signature did not match the recomputed one.
    Integrity,
    /// The client configuration is invalid.
    Configuration,
    /// The gateway answered with a non-success result code.
    Rejected,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Transport => "transport error",
            Kind::Encoding => "encoding error",
            Kind::Decoding => "decoding error",
            Kind::Integrity => "integrity error",
            Kind::Configuration => "configuration error",
            Kind::Rejected => "rejected by gateway",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let source = self.source.as_deref()?;
        source.downcast_ref::<E>()
    }

    pub fn configuration<S: Into<String>>(reason: S) -> Self {
        Self::with_source(
            Kind::Configuration,
            Configuration {
                reason: reason.into(),
            },
        )
    }

    #[must_use]
    pub fn integrity(exchange: Exchange) -> Self {
        Self::with_source(Kind::Integrity, Integrity { exchange })
    }

    #[must_use]
    pub fn rejected(outcome: Outcome, result: String, message: String, exchange: Exchange) -> Self {
        Self::with_source(
            Kind::Rejected,
            Rejected {
                outcome,
                result,
                message,
                exchange,
            },
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {source}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Transport, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Configuration, e)
    }
}

impl From<quick_xml::SeError> for Error {
    fn from(e: quick_xml::SeError) -> Self {
        Error::with_source(Kind::Encoding, e)
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(e: quick_xml::DeError) -> Self {
        Error::with_source(Kind::Decoding, e)
    }
}

/// HTTP metadata of a completed round trip with the gateway.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exchange {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
}

impl Exchange {
    pub fn new<S: Into<String>>(method: Method, path: S, status: StatusCode) -> Self {
        Self {
            method,
            path: path.into(),
            status,
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub reason: String,
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl StdError for Configuration {}

/// The response signature did not verify against the shared secret.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Integrity {
    pub exchange: Exchange,
}

impl fmt::Display for Integrity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "validation hash error: method: {}, path: {}, status code: {}",
            self.exchange.method,
            self.exchange.path,
            self.exchange.status.as_u16()
        )
    }
}

impl StdError for Integrity {}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rejected {
    pub outcome: Outcome,
    pub result: String,
    pub message: String,
    pub exchange: Exchange,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} result code: {}, message: {}",
            self.exchange.method,
            self.exchange.path,
            self.exchange.status.as_u16(),
            self.result,
            self.message
        )
    }
}

impl StdError for Rejected {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_message_names_the_exchange() {
        let err = Error::integrity(Exchange::new(Method::POST, "/test", StatusCode::OK));

        assert_eq!(err.kind(), Kind::Integrity);
        assert_eq!(
            err.to_string(),
            "integrity error: validation hash error: method: POST, path: /test, status code: 200"
        );
        let integrity = err.downcast_ref::<Integrity>().expect("integrity source");
        assert_eq!(integrity.exchange.path, "/test");
    }

    #[test]
    fn configuration_error_keeps_reason() {
        let err = Error::configuration("baseURL contains a trailing slash");

        assert_eq!(err.kind(), Kind::Configuration);
        assert_eq!(
            err.downcast_ref::<Configuration>().map(|c| c.reason.as_str()),
            Some("baseURL contains a trailing slash")
        );
    }

    #[test]
    fn url_parse_failures_are_configuration_errors() {
        let err: Error = url::Url::parse("not a url").unwrap_err().into();

        assert_eq!(err.kind(), Kind::Configuration);
    }
}
