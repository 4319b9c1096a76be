//! Chained SHA-1 signatures used to authenticate requests and responses.
//!
//! The gateway signs a message by hashing the `.`-joined field values, then
//! hashing that hex digest joined with the shared secret:
//!
//! ```text
//! sha1hex(sha1hex(e1 "." e2 "." ... en) "." secret)
//! ```

use secrecy::{ExposeSecret as _, SecretString};
use sha1::{Digest as _, Sha1};
use subtle::ConstantTimeEq as _;

const DELIMITER: &[u8] = b".";

/// Computes the 40 character lowercase hex chained signature of `elements`.
///
/// An empty slice is valid and hashes the empty string.
#[must_use]
pub fn chained_signature<S: AsRef<str>>(elements: &[S], secret: &str) -> String {
    let mut hasher = Sha1::new();
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            hasher.update(DELIMITER);
        }
        hasher.update(element.as_ref().as_bytes());
    }
    let digest = hex::encode(hasher.finalize());

    let mut hasher = Sha1::new();
    hasher.update(digest.as_bytes());
    hasher.update(DELIMITER);
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Ordered values to sign together with the secret they are signed with.
///
/// Built fresh for every request or response and dropped afterwards.
#[derive(Debug)]
pub struct SigningContext<'a> {
    elements: Vec<&'a str>,
    secret: &'a SecretString,
}

impl<'a> SigningContext<'a> {
    #[must_use]
    pub fn new(elements: Vec<&'a str>, secret: &'a SecretString) -> Self {
        Self { elements, secret }
    }

    #[must_use]
    pub fn elements(&self) -> &[&'a str] {
        &self.elements
    }

    #[must_use]
    pub fn sign(&self) -> String {
        chained_signature(&self.elements, self.secret.expose_secret())
    }

    /// Checks `candidate` against the expected signature in constant time.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        self.sign().as_bytes().ct_eq(candidate.as_bytes()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        assert_eq!(
            chained_signature(&["elem1", "elem2"], "test"),
            "dbd4aebd6ead0f3c2e56017aef55135c4efd3aba"
        );
    }

    #[test]
    fn deterministic() {
        let elements = ["20180614095601", "realexsandbox", "order", "1001", "EUR"];

        let first = chained_signature(&elements, "secret");
        let second = chained_signature(&elements, "secret");

        assert_eq!(first, second, "identical inputs must sign identically");
        assert_eq!(first.len(), 40, "signature is a hex encoded sha1 digest");
        assert!(
            first.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')),
            "signature must be lowercase hex: {first}"
        );
    }

    #[test]
    fn empty_elements_are_valid() {
        let none: [&str; 0] = [];

        assert_eq!(
            chained_signature(&none, "Po8lRRT67a"),
            "ec58c2e09ccfc2093f66f31e97a4458a62b8d484"
        );
    }

    #[test]
    fn empty_slot_is_not_skipped() {
        let with_slot = chained_signature(&["a", "", "b"], "s");
        let without_slot = chained_signature(&["a", "b"], "s");

        assert_ne!(with_slot, without_slot);
    }

    #[test]
    fn accepts_owned_strings() {
        let owned = vec!["elem1".to_owned(), "elem2".to_owned()];

        assert_eq!(
            chained_signature(&owned, "test"),
            chained_signature(&["elem1", "elem2"], "test")
        );
    }

    #[test]
    fn context_verifies_its_own_signature() {
        let secret = SecretString::from("test".to_owned());
        let context = SigningContext::new(vec!["elem1", "elem2"], &secret);

        assert!(context.verify("dbd4aebd6ead0f3c2e56017aef55135c4efd3aba"));
        assert!(!context.verify("dbd4aebd6ead0f3c2e56017aef55135c4efd3abb"));
        assert!(!context.verify("dbd4aebd"));
        assert!(!context.verify(""));
    }
}
