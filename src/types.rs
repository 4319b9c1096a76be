use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use uuid::Uuid;

/// Generates a fresh order id: a random UUID in unpadded URL-safe base64.
///
/// The result is 22 characters of `[A-Za-z0-9_-]`, all accepted by the gateway.
#[must_use]
pub fn new_order_id() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}
