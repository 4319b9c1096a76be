#![allow(dead_code, reason = "not every test binary uses every helper")]

use globalpay_client_sdk::clock::FixedClock;
use globalpay_client_sdk::signature::chained_signature;
use globalpay_client_sdk::{Client, ConfigOption};
use httpmock::MockServer;

pub const TIMESTAMP: &str = "20180614095601";
pub const MERCHANT_ID: &str = "realexsandbox";
pub const SHARED_SECRET: &str = "Po8lRRT67a";
pub const REBATE_SECRET: &str = "R3fundS3cret";
pub const SERVICE_PATH: &str = "/epage-remote.cgi";

pub const PAYER_REF: &str = "03e28f0e-492e-80bd-20ec318e9334";
pub const CARD_REF: &str = "3c4af936-3732-a393-f558bec2fb2a";

/// Client pinned to [`TIMESTAMP`] and pointed at `server`.
pub fn client(server: &MockServer) -> Client {
    Client::new([
        ConfigOption::base_url(server.base_url()),
        ConfigOption::rebate_secret(REBATE_SECRET),
        ConfigOption::clock(FixedClock::from_formatted(TIMESTAMP)),
    ])
    .expect("valid test config")
}

/// A successful gateway reply for `order_id`, signed with the shared secret.
pub fn signed_response(order_id: &str) -> String {
    let timestamp = "20180614095602";
    let result = "00";
    let message = "Successful";
    let pas_ref = "14631546336115597";
    let signature = chained_signature(
        &[timestamp, MERCHANT_ID, order_id, result, message, pas_ref, ""],
        SHARED_SECRET,
    );

    format!(
        r#"<response timestamp="{timestamp}">
  <merchantid>{MERCHANT_ID}</merchantid>
  <account>internet</account>
  <orderid>{order_id}</orderid>
  <result>{result}</result>
  <message>{message}</message>
  <pasref>{pas_ref}</pasref>
  <authcode/>
  <batchid/>
  <timetaken>0</timetaken>
  <sha1hash>{signature}</sha1hash>
</response>"#
    )
}
