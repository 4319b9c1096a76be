use crate::Result;
use crate::card_storage::operation::Operation;
use crate::card_storage::request::SignedRequest;
use crate::card_storage::types::{CardStorageRequest, ServiceReply};
use crate::client::Client;

/// Card storage ("receipt-in", "payer-new", "card-new", ...) operations.
///
/// Every operation stamps the request, signs the fields listed in
/// [`Operation::fields`] and posts it. The reply is returned only if its
/// signature verifies.
#[derive(Clone, Copy, Debug)]
pub struct CardStorage<'a> {
    client: &'a Client,
    path: &'a str,
}

impl<'a> CardStorage<'a> {
    pub(crate) fn new(client: &'a Client, path: &'a str) -> Self {
        Self { client, path }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.path
    }

    /// Charges a stored card.
    pub async fn authorize(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::Authorize, request).await
    }

    /// Checks a stored card without charging it.
    pub async fn validate(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::Validate, request).await
    }

    /// Pays out to a stored card. Signed with the rebate secret.
    pub async fn credit(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::Credit, request).await
    }

    /// Registers a new payer.
    pub async fn create_customer(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::CreateCustomer, request).await
    }

    /// Updates a stored payer.
    pub async fn edit_customer(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::EditCustomer, request).await
    }

    /// Stores a card against an existing payer.
    pub async fn store_card(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::StoreCard, request).await
    }

    /// Replaces the details of a stored card.
    pub async fn edit_card(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::EditCard, request).await
    }

    /// Removes a stored card.
    pub async fn delete_card(&self, request: &CardStorageRequest) -> Result<ServiceReply> {
        self.execute(Operation::DeleteCard, request).await
    }

    /// Stamps and signs `request` for `operation` without sending it.
    #[must_use]
    pub fn sign<'r>(&self, operation: Operation, request: &'r CardStorageRequest) -> SignedRequest<'r>
    where
        'a: 'r,
    {
        SignedRequest::sign(
            operation,
            self.client.timestamp(),
            self.client.merchant_id(),
            request,
            self.client.secret(operation.secret()),
        )
    }

    /// Sends an already signed request.
    pub async fn transmit(&self, request: &SignedRequest<'_>) -> Result<ServiceReply> {
        self.client.transmit(self.path, request).await
    }

    /// Signs `request` for `operation` and sends it.
    pub async fn execute(
        &self,
        operation: Operation,
        request: &CardStorageRequest,
    ) -> Result<ServiceReply> {
        let signed = self.sign(operation, request);
        self.transmit(&signed).await
    }
}
