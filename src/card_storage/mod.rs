//! Card storage service: stored payers and cards, and payments against them.
//!
//! Each operation signs a fixed, operation specific list of request fields
//! (see [`Operation::fields`]) with a chained SHA-1 signature, posts the
//! request and verifies the signature of the reply before returning it.

mod client;
mod operation;
mod request;
mod types;

pub use client::CardStorage;
pub use operation::{Operation, SecretKind, SignedField};
pub use request::SignedRequest;
pub use types::{
    Address, Amount, AutoSettle, Card, CardIssuer, CardStorageRequest, CardStorageResponse,
    Country, Cvn, Outcome, PaymentData, Payer, PhoneNumbers, ServiceReply,
};
