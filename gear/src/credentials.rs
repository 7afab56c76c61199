//! Gateway identity and shared secret.

use secrecy::{ExposeSecret, SecretString};

use crate::signer::Signer;

/// The `(gateway_id, gateway_secret)` pair issued by Mycelium Gear.
///
/// Immutable once built. The secret is held in a [`SecretString`], so the
/// `Debug` output of this type (and of every client holding it) redacts it.
#[derive(Clone, Debug)]
pub struct GatewayCredentials {
    gateway_id: String,
    gateway_secret: SecretString,
}

impl GatewayCredentials {
    /// Creates credentials from a gateway id and its secret.
    pub fn new(gateway_id: impl Into<String>, gateway_secret: impl Into<String>) -> Self {
        Self {
            gateway_id: gateway_id.into(),
            gateway_secret: SecretString::from(gateway_secret.into()),
        }
    }

    /// Returns the gateway id.
    #[must_use]
    pub fn gateway_id(&self) -> &str {
        &self.gateway_id
    }

    /// Returns a [`Signer`] keyed with the gateway secret.
    #[must_use]
    pub fn signer(&self) -> Signer<'_> {
        Signer::new(self.secret_bytes())
    }

    fn secret_bytes(&self) -> &[u8] {
        self.gateway_secret.expose_secret().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let creds = GatewayCredentials::new("gw1", "super-secret-value");
        let debug = format!("{creds:?}");
        assert!(debug.contains("gw1"));
        assert!(!debug.contains("super-secret-value"));
    }

    #[test]
    fn test_secret_bytes() {
        let creds = GatewayCredentials::new("gw1", "s3cr3t");
        assert_eq!(creds.gateway_id(), "gw1");
        assert_eq!(creds.secret_bytes(), b"s3cr3t");
    }
}
