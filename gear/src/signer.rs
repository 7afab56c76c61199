//! HMAC-SHA512 request signing and callback verification.
//!
//! # Outbound requests
//!
//! ```text
//! body_hash = SHA512(nonce_decimal || body)
//! payload   = method || path || query || body_hash
//! signature = base64(HMAC-SHA512(secret, payload))
//! ```
//!
//! `body` is empty for every current endpoint.
//!
//! # Inbound callbacks
//!
//! Callbacks are signed with a fixed nonce, the SHA-512 digest of the empty
//! string, in place of the timestamp hash:
//!
//! ```text
//! payload   = method || path || SHA512("")
//! signature = base64(HMAC-SHA512(secret, payload))
//! ```
//!
//! The two derivations differ on purpose and must not be unified; the
//! gateway produces and expects exactly these bytes.

use std::fmt;

use base64::prelude::*;
use hmac::{Hmac, Mac};
use http::Method;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use crate::nonce::Nonce;

type HmacSha512 = Hmac<Sha512>;

/// The canonical unit that gets signed for an outbound call.
///
/// `path` always starts with `/gateways/{gateway_id}/`; `query` is the output
/// of [`QueryParams::build_query`](crate::endpoint::QueryParams::build_query).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, without the base URL.
    pub path: String,
    /// Query string or path suffix, possibly empty.
    pub query: String,
    /// Nonce sent in `X-Nonce`.
    pub nonce: Nonce,
}

impl SignedRequest {
    /// Returns `path + query`, the part appended to the base URL.
    #[must_use]
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.path, self.query)
    }
}

/// Computes and checks signatures with a gateway secret.
///
/// Obtained from [`GatewayCredentials::signer`](crate::credentials::GatewayCredentials::signer).
/// Signing and verification are pure: the same inputs always give the same
/// output, and a mismatch is reported as `false`, never as an error.
#[derive(Clone, Copy)]
pub struct Signer<'a> {
    secret: &'a [u8],
}

impl fmt::Debug for Signer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

impl<'a> Signer<'a> {
    /// Creates a signer over raw secret bytes.
    #[must_use]
    pub const fn new(secret: &'a [u8]) -> Self {
        Self { secret }
    }

    /// Signs an outbound request with an empty body.
    #[must_use]
    pub fn sign(&self, request: &SignedRequest) -> String {
        self.sign_with_body(request, b"")
    }

    /// Signs an outbound request carrying `body`.
    #[must_use]
    pub fn sign_with_body(&self, request: &SignedRequest, body: &[u8]) -> String {
        let mut hasher = Sha512::new();
        hasher.update(request.nonce.to_string().as_bytes());
        hasher.update(body);
        let body_hash = hasher.finalize();

        let mut mac = self.mac();
        mac.update(request.method.as_str().as_bytes());
        mac.update(request.path.as_bytes());
        mac.update(request.query.as_bytes());
        mac.update(&body_hash);
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Computes the signature the gateway attaches to a callback for
    /// `method` and `path` (the path includes any query string).
    #[must_use]
    pub fn callback_signature(&self, method: &str, path: &str) -> String {
        let nonce = Sha512::digest(b"");

        let mut mac = self.mac();
        mac.update(method.as_bytes());
        mac.update(path.as_bytes());
        mac.update(&nonce);
        BASE64_STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Checks a callback's `X-Signature` value.
    ///
    /// `signature` must be the base64 text as received. The comparison runs
    /// in constant time over the text bytes.
    #[must_use]
    pub fn verify_callback(&self, method: &str, path: &str, signature: &str) -> bool {
        let expected = self.callback_signature(method, path);
        expected.as_bytes().ct_eq(signature.as_bytes()).into()
    }

    fn mac(&self) -> HmacSha512 {
        HmacSha512::new_from_slice(self.secret).expect("HMAC accepts keys of any length")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"secret";

    fn request(method: Method, path: &str, query: &str, nonce: u64) -> SignedRequest {
        SignedRequest {
            method,
            path: path.to_owned(),
            query: query.to_owned(),
            nonce: Nonce::from_secs(nonce),
        }
    }

    #[test]
    fn test_sign_known_vector_post() {
        let req = request(Method::POST, "/gateways/gw1/orders", "?amount=1000", 1_700_000_000);
        assert_eq!(
            Signer::new(SECRET).sign(&req),
            "Hx9G5xaPglnPvjhjgbXFuV56S3HadWPkBSDAKUwhXGFFlOZ2xpl5ReQ1HuL/0dy6ZU6Jqf9WrGAApQIZTpM19g=="
        );
    }

    #[test]
    fn test_sign_known_vector_get_without_query() {
        let req = request(Method::GET, "/gateways/gw1/last_keychain_id", "", 1_700_000_000);
        assert_eq!(
            Signer::new(SECRET).sign(&req),
            "EOHWJWIc9uFnboFJWQbZA59fgc3gREHM3ptvpT25XQ0ygrWy+5u2yNzz2Ybp3jHooskcr5LyFgsZFL1Dnpdvvg=="
        );
    }

    #[test]
    fn test_sign_is_deterministic_within_a_second() {
        let signer = Signer::new(SECRET);
        let a = request(Method::GET, "/gateways/gw1/orders", "/7", 1_700_000_000);
        let b = a.clone();
        assert_eq!(signer.sign(&a), signer.sign(&b));
    }

    #[test]
    fn test_sign_changes_with_nonce() {
        let signer = Signer::new(SECRET);
        let a = request(Method::GET, "/gateways/gw1/orders", "/7", 1_700_000_000);
        let b = request(Method::GET, "/gateways/gw1/orders", "/7", 1_700_000_001);
        assert_ne!(signer.sign(&a), signer.sign(&b));
    }

    #[test]
    fn test_sign_changes_with_any_input() {
        let signer = Signer::new(SECRET);
        let base = request(Method::POST, "/gateways/gw1/orders", "?amount=1000", 1);
        let reference = signer.sign(&base);

        let mut method = base.clone();
        method.method = Method::GET;
        assert_ne!(signer.sign(&method), reference);

        let mut path = base.clone();
        path.path = "/gateways/gw2/orders".to_owned();
        assert_ne!(signer.sign(&path), reference);

        let mut query = base.clone();
        query.query = "?amount=1001".to_owned();
        assert_ne!(signer.sign(&query), reference);

        assert_ne!(Signer::new(b"secreT").sign(&base), reference);
    }

    #[test]
    fn test_body_is_part_of_signature() {
        let signer = Signer::new(SECRET);
        let req = request(Method::POST, "/gateways/gw1/orders", "", 1);
        assert_eq!(signer.sign(&req), signer.sign_with_body(&req, b""));
        assert_ne!(signer.sign(&req), signer.sign_with_body(&req, b"{}"));
    }

    #[test]
    fn test_callback_known_vector() {
        assert_eq!(
            Signer::new(SECRET).callback_signature("GET", "/callback?order_id=1&status=2"),
            "Zb9L0PmdHpbyvU9q7K0IcAU2pyDk6WoOCnDhUnvzxJvcLgznLMho7FNLC2ppSq3ZfEqLhDayIrV9uIkd21VxxQ=="
        );
    }

    #[test]
    fn test_callback_round_trip() {
        let signer = Signer::new(b"another secret");
        for (method, path) in [("GET", "/"), ("POST", "/hooks/gear?id=9"), ("GET", "")] {
            let signature = signer.callback_signature(method, path);
            assert!(signer.verify_callback(method, path, &signature));
        }
    }

    #[test]
    fn test_callback_rejects_tampering() {
        let signer = Signer::new(SECRET);
        let signature = signer.callback_signature("GET", "/callback?status=2");
        assert!(!signer.verify_callback("GET", "/callback?status=5", &signature));
        assert!(!signer.verify_callback("POST", "/callback?status=2", &signature));
        assert!(!Signer::new(b"other").verify_callback("GET", "/callback?status=2", &signature));
        assert!(!signer.verify_callback("GET", "/callback?status=2", ""));
        assert!(!signer.verify_callback("GET", "/callback?status=2", &signature[1..]));
    }

    #[test]
    fn test_callback_differs_from_outbound_signing() {
        let signer = Signer::new(SECRET);
        let req = request(Method::GET, "/callback", "", 0);
        assert_ne!(signer.sign(&req), signer.callback_signature("GET", "/callback"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", Signer::new(b"hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
