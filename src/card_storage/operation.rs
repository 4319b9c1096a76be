use serde::{Serialize, Serializer};
use strum_macros::{Display, IntoStaticStr};

/// Card storage operations and their wire type codes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, Eq, Hash, IntoStaticStr, PartialEq)]
pub enum Operation {
    /// Charge a stored card.
    #[strum(serialize = "receipt-in")]
    Authorize,
    /// Check a stored card without charging it.
    #[strum(serialize = "receipt-in-otb")]
    Validate,
    /// Pay out to a stored card. Signed with the rebate secret.
    #[strum(serialize = "payment-out")]
    Credit,
    #[strum(serialize = "payer-new")]
    CreateCustomer,
    #[strum(serialize = "payer-edit")]
    EditCustomer,
    #[strum(serialize = "card-new")]
    StoreCard,
    #[strum(serialize = "card-update-card")]
    EditCard,
    #[strum(serialize = "card-cancel-card")]
    DeleteCard,
}

/// Request value occupying one slot of a request signature.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SignedField {
    Timestamp,
    MerchantId,
    OrderId,
    Amount,
    Currency,
    PayerRef,
    CardHolderName,
    CardNumber,
    CardRef,
    CardExpiry,
}

/// Which configured secret signs a request.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SecretKind {
    Shared,
    Rebate,
}

use SignedField::{
    Amount, CardExpiry, CardHolderName, CardNumber, CardRef, Currency, MerchantId, OrderId,
    PayerRef, Timestamp,
};

const PAYMENT_FIELDS: &[SignedField] = &[Timestamp, MerchantId, OrderId, Amount, Currency, PayerRef];
const VALIDATE_FIELDS: &[SignedField] = &[Timestamp, MerchantId, OrderId, PayerRef];
const STORE_CARD_FIELDS: &[SignedField] = &[
    Timestamp,
    MerchantId,
    OrderId,
    Amount,
    Currency,
    PayerRef,
    CardHolderName,
    CardNumber,
];
const EDIT_CARD_FIELDS: &[SignedField] =
    &[Timestamp, MerchantId, PayerRef, CardRef, CardExpiry, CardNumber];
const DELETE_CARD_FIELDS: &[SignedField] = &[Timestamp, MerchantId, PayerRef, CardRef];

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::Authorize,
        Operation::Validate,
        Operation::Credit,
        Operation::CreateCustomer,
        Operation::EditCustomer,
        Operation::StoreCard,
        Operation::EditCard,
        Operation::DeleteCard,
    ];

    #[must_use]
    pub fn type_code(self) -> &'static str {
        self.into()
    }

    /// Fields signed by this operation, in gateway order.
    #[must_use]
    pub const fn fields(self) -> &'static [SignedField] {
        match self {
            Operation::Authorize
            | Operation::Credit
            | Operation::CreateCustomer
            | Operation::EditCustomer => PAYMENT_FIELDS,
            Operation::Validate => VALIDATE_FIELDS,
            Operation::StoreCard => STORE_CARD_FIELDS,
            Operation::EditCard => EDIT_CARD_FIELDS,
            Operation::DeleteCard => DELETE_CARD_FIELDS,
        }
    }

    #[must_use]
    pub const fn secret(self) -> SecretKind {
        match self {
            Operation::Credit => SecretKind::Rebate,
            _ => SecretKind::Shared,
        }
    }
}

impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_code())
    }
}
