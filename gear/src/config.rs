//! Client configuration.
//!
//! Defaults point at the public Mycelium Gear deployment. Every URL can be
//! overridden so tests and staging setups can target a mock endpoint.

use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_PAYMENT_URL, DEFAULT_SOCKET_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::error::GearError;

/// Endpoints and timeout used by a [`GearClient`](crate::client::GearClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GearConfig {
    base_url: String,
    socket_base_url: String,
    payment_base_url: String,
    timeout: Duration,
}

impl Default for GearConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            socket_base_url: DEFAULT_SOCKET_URL.to_owned(),
            payment_base_url: DEFAULT_PAYMENT_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GearConfig {
    /// Creates a config whose REST calls go to `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// URL that can carry a path.
    pub fn new(base_url: &str) -> Result<Self, GearError> {
        Self::default().with_base_url(base_url)
    }

    /// Sets the REST base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::InvalidBaseUrl`] if the URL is rejected.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, GearError> {
        self.base_url = normalize(base_url)?;
        Ok(self)
    }

    /// Sets the websocket base URL used by
    /// [`GearClient::order_websocket_link`](crate::client::GearClient::order_websocket_link).
    ///
    /// # Errors
    ///
    /// Returns [`GearError::InvalidBaseUrl`] if the URL is rejected.
    pub fn with_socket_base_url(mut self, socket_base_url: &str) -> Result<Self, GearError> {
        self.socket_base_url = normalize(socket_base_url)?;
        Ok(self)
    }

    /// Sets the payment page base URL used by
    /// [`GearClient::order_payment_link`](crate::client::GearClient::order_payment_link).
    ///
    /// # Errors
    ///
    /// Returns [`GearError::InvalidBaseUrl`] if the URL is rejected.
    pub fn with_payment_base_url(mut self, payment_base_url: &str) -> Result<Self, GearError> {
        self.payment_base_url = normalize(payment_base_url)?;
        Ok(self)
    }

    /// Sets the connect/read timeout passed to the transport.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// REST base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Websocket base URL, without trailing slash.
    #[must_use]
    pub fn socket_base_url(&self) -> &str {
        &self.socket_base_url
    }

    /// Payment page base URL, without trailing slash.
    #[must_use]
    pub fn payment_base_url(&self) -> &str {
        &self.payment_base_url
    }

    /// Transport timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Validates `input` and returns its parsed serialization without trailing
/// slashes, so paths can be appended verbatim.
fn normalize(input: &str) -> Result<String, GearError> {
    let url = Url::parse(input).map_err(|e| GearError::InvalidBaseUrl {
        url: input.to_owned(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(GearError::InvalidBaseUrl {
            url: input.to_owned(),
            reason: "URL cannot carry a path".to_owned(),
        });
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(GearError::InvalidBaseUrl {
            url: input.to_owned(),
            reason: "base URL must not have a query or fragment".to_owned(),
        });
    }
    Ok(url.as_str().trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GearConfig::default();
        assert_eq!(config.base_url(), "https://gateway.gear.mycelium.com");
        assert_eq!(config.socket_base_url(), "wss://gateway.gear.mycelium.com");
        assert_eq!(config.payment_base_url(), "https://gateway.gear.mycelium.com");
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let config = GearConfig::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_surrounding_whitespace_is_stripped() {
        let config = GearConfig::new(" https://x.test/ \n").unwrap();
        assert_eq!(config.base_url(), "https://x.test");

        let config = config.with_socket_base_url("\twss://x.test ").unwrap();
        assert_eq!(config.socket_base_url(), "wss://x.test");
    }

    #[test]
    fn test_invalid_base_urls_are_rejected() {
        for input in ["not a url", "mailto:gear@example.com", "https://x.test/?a=1"] {
            let err = GearConfig::new(input).unwrap_err();
            assert!(matches!(err, GearError::InvalidBaseUrl { .. }), "{input}");
        }
    }

    #[test]
    fn test_builder_setters() {
        let config = GearConfig::default()
            .with_timeout(Duration::from_secs(5))
            .with_socket_base_url("ws://localhost:9000")
            .unwrap()
            .with_payment_base_url("http://localhost:9000/")
            .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.socket_base_url(), "ws://localhost:9000");
        assert_eq!(config.payment_base_url(), "http://localhost:9000");
    }
}
