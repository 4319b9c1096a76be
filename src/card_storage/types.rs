use bon::Builder;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::Result;
use crate::error::{Error, Exchange};
use crate::signature::SigningContext;

/// Caller supplied part of a card storage request.
///
/// Type code, timestamp, merchant id and signature are stamped by the client
/// when the request is signed; this value is never modified.
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq)]
pub struct CardStorageRequest {
    #[builder(into)]
    pub account: Option<String>,
    #[builder(into)]
    pub channel: Option<String>,
    #[builder(into, default)]
    pub order_id: String,
    #[builder(into, default)]
    pub payer_ref: String,
    #[builder(into)]
    pub payment_method: Option<String>,
    pub amount: Option<Amount>,
    pub auto_settle: Option<AutoSettle>,
    pub payment_data: Option<PaymentData>,
    pub payer: Option<Payer>,
    pub card: Option<Card>,
}

/// Amount in the currency's minor unit, e.g. `1001` for 10.01.
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Amount {
    #[serde(rename = "@currency")]
    #[builder(into)]
    pub currency: String,
    #[serde(rename = "$text")]
    #[builder(into)]
    pub value: String,
}

impl Amount {
    pub fn new<V: Into<String>, C: Into<String>>(value: V, currency: C) -> Self {
        Self {
            currency: currency.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AutoSettle {
    #[serde(rename = "@flag")]
    pub flag: String,
}

impl AutoSettle {
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            flag: "1".to_owned(),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self {
            flag: "0".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PaymentData {
    pub cvn: Cvn,
}

impl PaymentData {
    pub fn with_cvn<S: Into<String>>(number: S) -> Self {
        Self {
            cvn: Cvn {
                number: number.into(),
            },
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Cvn {
    pub number: String,
}

#[skip_serializing_none]
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Payer {
    #[serde(rename = "@ref")]
    #[builder(into)]
    pub payer_ref: Option<String>,
    #[serde(rename = "@type")]
    #[builder(into)]
    pub payer_type: Option<String>,
    #[builder(into)]
    pub title: Option<String>,
    #[serde(rename = "firstname")]
    #[builder(into)]
    pub first_name: Option<String>,
    #[builder(into)]
    pub surname: Option<String>,
    #[builder(into)]
    pub company: Option<String>,
    pub address: Option<Address>,
    #[serde(rename = "phonenumbers")]
    pub phone_numbers: Option<PhoneNumbers>,
    #[builder(into)]
    pub email: Option<String>,
    #[serde(rename = "dateofbirth")]
    #[builder(into)]
    pub date_of_birth: Option<String>,
    #[builder(into)]
    pub state: Option<String>,
    #[builder(into)]
    pub passphrase: Option<String>,
    #[serde(rename = "vatnumber")]
    #[builder(into)]
    pub vat_number: Option<String>,
    #[serde(rename = "varref")]
    #[builder(into)]
    pub variable_reference: Option<String>,
    #[serde(rename = "custnum")]
    #[builder(into)]
    pub customer_number: Option<String>,
}

#[skip_serializing_none]
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Address {
    #[builder(into)]
    pub line1: Option<String>,
    #[builder(into)]
    pub line2: Option<String>,
    #[builder(into)]
    pub line3: Option<String>,
    #[builder(into)]
    pub city: Option<String>,
    #[builder(into)]
    pub county: Option<String>,
    #[serde(rename = "postcode")]
    #[builder(into)]
    pub post_code: Option<String>,
    pub country: Option<Country>,
}

/// ISO 3166 code plus display name, e.g. `<country code="IE">Ireland</country>`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Country {
    #[serde(rename = "@code")]
    pub code: String,
    #[serde(rename = "$text")]
    pub name: String,
}

impl Country {
    pub fn new<C: Into<String>, N: Into<String>>(code: C, name: N) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[skip_serializing_none]
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PhoneNumbers {
    #[builder(into)]
    pub home: Option<String>,
    #[builder(into)]
    pub work: Option<String>,
    #[builder(into)]
    pub fax: Option<String>,
    #[builder(into)]
    pub mobile: Option<String>,
}

#[skip_serializing_none]
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Card {
    #[serde(rename = "ref")]
    #[builder(into)]
    pub card_ref: Option<String>,
    #[serde(rename = "payerref")]
    #[builder(into)]
    pub payer_ref: Option<String>,
    #[builder(into)]
    pub number: Option<String>,
    #[serde(rename = "expdate")]
    #[builder(into)]
    pub expiry_date: Option<String>,
    #[serde(rename = "chname")]
    #[builder(into)]
    pub holder_name: Option<String>,
    #[serde(rename = "type")]
    #[builder(into)]
    pub card_type: Option<String>,
}

/// Decoded gateway response. Elements missing from the document are empty.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename = "response", default)]
pub struct CardStorageResponse {
    #[serde(rename = "@timestamp")]
    pub timestamp: String,
    #[serde(rename = "merchantid")]
    pub merchant_id: String,
    pub account: String,
    #[serde(rename = "orderid")]
    pub order_id: String,
    #[serde(rename = "authcode")]
    pub auth_code: String,
    pub result: String,
    #[serde(rename = "cvnresult")]
    pub cvn_result: String,
    #[serde(rename = "avspostcoderesponse")]
    pub avs_postcode_response: String,
    #[serde(rename = "avsaddressresponse")]
    pub avs_address_response: String,
    #[serde(rename = "batchid")]
    pub batch_id: String,
    pub message: String,
    /// Processor reference.
    #[serde(rename = "pasref")]
    pub pas_ref: String,
    #[serde(rename = "timetaken")]
    pub time_taken: String,
    #[serde(rename = "authtimetaken")]
    pub auth_time_taken: String,
    #[serde(rename = "cardissuer")]
    pub card_issuer: Option<CardIssuer>,
    #[serde(rename = "sha1hash")]
    pub signature: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct CardIssuer {
    pub bank: String,
    pub country: String,
    #[serde(rename = "countrycode")]
    pub country_code: String,
    pub region: String,
}

impl CardStorageResponse {
    /// Decodes a gateway reply document. Text content is kept as written so
    /// the signed values hash exactly as the gateway sent them.
    pub fn from_xml(text: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(text)?)
    }

    /// The seven values every response is signed over, whatever the operation.
    #[must_use]
    pub fn signing_context<'a>(&'a self, secret: &'a SecretString) -> SigningContext<'a> {
        SigningContext::new(
            vec![
                self.timestamp.as_str(),
                self.merchant_id.as_str(),
                self.order_id.as_str(),
                self.result.as_str(),
                self.message.as_str(),
                self.pas_ref.as_str(),
                self.auth_code.as_str(),
            ],
            secret,
        )
    }

    /// Recomputes the response signature and compares it with `sha1hash`.
    pub fn validate_signature(&self, secret: &SecretString, exchange: &Exchange) -> Result<()> {
        if self.signing_context(secret).verify(&self.signature) {
            Ok(())
        } else {
            Err(Error::integrity(exchange.clone()))
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        Outcome::from_result_code(&self.result)
    }
}

/// Gateway result code families.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// `00`
    Success,
    /// `1xx`: declined or referred by the bank.
    Declined,
    /// `2xx`: the acquiring bank could not be reached or failed.
    BankError,
    /// `3xx`: gateway system error.
    GatewayError,
    /// `5xx`: the request was malformed or failed validation.
    RequestFormatError,
    /// `666`: the merchant account is deactivated.
    InvalidAccount,
    Unknown,
}

impl Outcome {
    #[must_use]
    pub fn from_result_code(code: &str) -> Self {
        let code = code.trim();
        if code == "00" {
            return Outcome::Success;
        }
        if code == "666" {
            return Outcome::InvalidAccount;
        }
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Outcome::Unknown;
        }
        match code.as_bytes().first() {
            Some(b'1') => Outcome::Declined,
            Some(b'2') => Outcome::BankError,
            Some(b'3') => Outcome::GatewayError,
            Some(b'5') => Outcome::RequestFormatError,
            _ => Outcome::Unknown,
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// A response whose signature has been verified, plus the exchange it came from.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceReply {
    pub response: CardStorageResponse,
    pub exchange: Exchange,
}

impl ServiceReply {
    #[must_use]
    pub fn new(response: CardStorageResponse, exchange: Exchange) -> Self {
        Self { response, exchange }
    }

    /// Turns a non-`00` result into a [`Kind::Rejected`](crate::error::Kind::Rejected) error.
    pub fn error_for_result(self) -> Result<Self> {
        let outcome = self.response.outcome();
        if outcome.is_success() {
            return Ok(self);
        }
        Err(Error::rejected(
            outcome,
            self.response.result,
            self.response.message,
            self.exchange,
        ))
    }
}
