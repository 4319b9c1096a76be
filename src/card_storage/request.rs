use secrecy::SecretString;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::Result;
use crate::card_storage::operation::{Operation, SignedField};
use crate::card_storage::types::{
    Amount, AutoSettle, Card, CardStorageRequest, PaymentData, Payer,
};
use crate::signature::SigningContext;

/// A request stamped with type code, timestamp and merchant id, and signed.
///
/// Serializes to the gateway's `<request>` document.
#[skip_serializing_none]
#[derive(Clone, Debug, Serialize)]
#[serde(rename = "request")]
pub struct SignedRequest<'a> {
    #[serde(rename = "@type")]
    operation: Operation,
    #[serde(rename = "@timestamp")]
    timestamp: String,
    #[serde(rename = "merchantid")]
    merchant_id: &'a str,
    account: Option<&'a str>,
    channel: Option<&'a str>,
    #[serde(rename = "orderid")]
    order_id: &'a str,
    #[serde(rename = "payerref")]
    payer_ref: &'a str,
    #[serde(rename = "paymentmethod")]
    payment_method: Option<&'a str>,
    #[serde(rename = "sha1hash")]
    signature: String,
    amount: Option<&'a Amount>,
    #[serde(rename = "autosettle")]
    auto_settle: Option<&'a AutoSettle>,
    #[serde(rename = "paymentdata")]
    payment_data: Option<&'a PaymentData>,
    payer: Option<&'a Payer>,
    card: Option<&'a Card>,
}

impl<'a> SignedRequest<'a> {
    /// Stamps `request` for `operation` and signs it with `secret`.
    pub(crate) fn sign(
        operation: Operation,
        timestamp: String,
        merchant_id: &'a str,
        request: &'a CardStorageRequest,
        secret: &SecretString,
    ) -> Self {
        let mut signed = Self {
            operation,
            timestamp,
            merchant_id,
            account: request.account.as_deref(),
            channel: request.channel.as_deref(),
            order_id: &request.order_id,
            payer_ref: &request.payer_ref,
            payment_method: request.payment_method.as_deref(),
            signature: String::new(),
            amount: request.amount.as_ref(),
            auto_settle: request.auto_settle.as_ref(),
            payment_data: request.payment_data.as_ref(),
            payer: request.payer.as_ref(),
            card: request.card.as_ref(),
        };
        let signature = signed.signing_context(secret).sign();
        signed.signature = signature;
        signed
    }

    /// Values this request is signed over, in the operation's order.
    #[must_use]
    pub fn signing_context<'s>(&'s self, secret: &'s SecretString) -> SigningContext<'s> {
        let elements = self
            .operation
            .fields()
            .iter()
            .map(|field| self.field(*field))
            .collect();
        SigningContext::new(elements, secret)
    }

    /// Value of `field`, or `""` when its group is absent.
    #[must_use]
    pub fn field(&self, field: SignedField) -> &str {
        let card = self.card;
        let value = match field {
            SignedField::Timestamp => Some(self.timestamp.as_str()),
            SignedField::MerchantId => Some(self.merchant_id),
            SignedField::OrderId => Some(self.order_id),
            SignedField::PayerRef => Some(self.payer_ref),
            SignedField::Amount => self.amount.map(|amount| amount.value.as_str()),
            SignedField::Currency => self.amount.map(|amount| amount.currency.as_str()),
            SignedField::CardHolderName => card.and_then(|card| card.holder_name.as_deref()),
            SignedField::CardNumber => card.and_then(|card| card.number.as_deref()),
            SignedField::CardRef => card.and_then(|card| card.card_ref.as_deref()),
            SignedField::CardExpiry => card.and_then(|card| card.expiry_date.as_deref()),
        };
        value.unwrap_or_default()
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    #[must_use]
    pub fn merchant_id(&self) -> &str {
        self.merchant_id
    }

    #[must_use]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Encodes the wire document.
    pub fn to_xml(&self) -> Result<String> {
        Ok(quick_xml::se::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card_storage::types::Cvn;

    const TIMESTAMP: &str = "20180614095601";
    const MERCHANT: &str = "realexsandbox";

    fn secret() -> SecretString {
        SecretString::from("Po8lRRT67a".to_owned())
    }

    fn sign<'a>(operation: Operation, request: &'a CardStorageRequest) -> SignedRequest<'a> {
        SignedRequest::sign(
            operation,
            TIMESTAMP.to_owned(),
            MERCHANT,
            request,
            &secret(),
        )
    }

    #[test]
    fn absent_amount_matches_empty_amount() {
        let missing = CardStorageRequest {
            order_id: "TestID_126".to_owned(),
            payer_ref: "payer".to_owned(),
            ..CardStorageRequest::default()
        };
        let empty = CardStorageRequest {
            amount: Some(Amount::new("", "")),
            ..missing.clone()
        };

        let missing = sign(Operation::CreateCustomer, &missing);
        let empty = sign(Operation::CreateCustomer, &empty);

        assert_eq!(missing.signature(), empty.signature());
        assert_eq!(
            missing.signing_context(&secret()).elements(),
            &[TIMESTAMP, MERCHANT, "TestID_126", "", "", "payer"]
        );
    }

    #[test]
    fn absent_card_fields_are_empty_slots() {
        let request = CardStorageRequest {
            payer_ref: "payer".to_owned(),
            card: Some(Card {
                card_ref: Some("card".to_owned()),
                ..Card::default()
            }),
            ..CardStorageRequest::default()
        };

        let signed = sign(Operation::EditCard, &request);

        assert_eq!(
            signed.signing_context(&secret()).elements(),
            &[TIMESTAMP, MERCHANT, "payer", "card", "", ""]
        );
    }

    #[test]
    fn signature_is_not_part_of_its_input() {
        let request = CardStorageRequest {
            order_id: "order".to_owned(),
            payer_ref: "payer".to_owned(),
            ..CardStorageRequest::default()
        };

        let signed = sign(Operation::Validate, &request);

        assert!(
            !signed
                .signing_context(&secret())
                .elements()
                .contains(&signed.signature()),
            "signature must not sign itself"
        );
        assert!(signed.signing_context(&secret()).verify(signed.signature()));
    }

    #[test]
    fn omits_absent_groups() {
        let request = CardStorageRequest {
            order_id: "order".to_owned(),
            payer_ref: "payer".to_owned(),
            payment_data: Some(PaymentData {
                cvn: Cvn {
                    number: "123".to_owned(),
                },
            }),
            ..CardStorageRequest::default()
        };

        let xml = sign(Operation::Validate, &request).to_xml().expect("encodes");

        assert!(xml.starts_with(r#"<request type="receipt-in-otb" timestamp="20180614095601">"#), "{xml}");
        assert!(xml.contains("<paymentdata><cvn><number>123</number></cvn></paymentdata>"), "{xml}");
        assert!(!xml.contains("<amount"), "{xml}");
        assert!(!xml.contains("<account"), "{xml}");
        assert!(!xml.contains("<card"), "{xml}");
    }
}
