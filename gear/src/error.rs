//! Error types for signed gateway calls.
//!
//! Every non-success outcome of a dispatched request maps onto one
//! [`GearError`] variant. Nothing is printed and discarded: a transport
//! failure, a domain rejection and an undecodable body all reach the caller.

use http::StatusCode;

/// Boxed error used as the source of transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A transport-level failure (connect, DNS, TLS, timeout, body read).
///
/// Produced by [`Transport`](crate::transport::Transport) implementations.
/// The gateway was never reached, or its answer could not be read.
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
pub struct TransportError {
    context: String,
    #[source]
    source: BoxError,
    timeout: bool,
}

impl TransportError {
    /// Creates a new transport error for the request described by `context`
    /// (e.g. `"GET /gateways/gw1/last_keychain_id"`).
    pub fn new(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            context: context.into(),
            source: source.into(),
            timeout: false,
        }
    }

    /// Marks the failure as caused by the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: bool) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns `true` if the request timed out.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        self.timeout
    }

    /// Human-readable description of the failed request.
    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Errors returned by [`GearClient`](crate::client::GearClient) operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GearError {
    /// The request never produced an HTTP response.
    #[error("Request to gateway failed: {0}")]
    Transport(#[from] TransportError),

    /// Order creation targeted an address that is bound to a pending order.
    #[error("Invalid order: address already in use")]
    AddressAlreadyInUse,

    /// Any other non-200 response. `body` is the raw response text and may be empty.
    #[error("Gateway returned {status}: {body}")]
    Gateway {
        /// HTTP status of the response.
        status: StatusCode,
        /// Raw response text.
        body: String,
    },

    /// A 200 response whose body is not a JSON object.
    #[error("Failed to decode gateway response: {source}")]
    MalformedResponse {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// Raw response text.
        body: String,
    },

    /// The `status` field of an order response is missing or out of range.
    #[error("Unexpected order status in gateway response: {value}")]
    UnexpectedStatus {
        /// The offending value (`null` when the field is absent).
        value: serde_json::Value,
    },

    /// A configured base URL does not parse or cannot carry a path.
    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The rejected input.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A computed request header could not be encoded as an HTTP header value.
    #[error("Invalid {name} header value")]
    InvalidHeader {
        /// Header name.
        name: http::HeaderName,
        /// The underlying `http` error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },
}

impl GearError {
    /// Returns `true` for the [`GearError::AddressAlreadyInUse`] domain error.
    #[must_use]
    pub const fn is_address_already_in_use(&self) -> bool {
        matches!(self, Self::AddressAlreadyInUse)
    }

    /// Returns `true` if the error came from the transport.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// HTTP status of a [`GearError::Gateway`] response.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Gateway { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_display_includes_context() {
        let err = TransportError::new("GET /gateways/gw1/orders/7", "connection refused");
        assert_eq!(
            err.to_string(),
            "GET /gateways/gw1/orders/7: connection refused"
        );
        assert!(!err.is_timeout());
        assert!(err.with_timeout(true).is_timeout());
    }

    #[test]
    fn test_gateway_error_carries_status_and_body() {
        let err = GearError::Gateway {
            status: StatusCode::BAD_REQUEST,
            body: "boom".to_owned(),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.to_string(), "Gateway returned 400 Bad Request: boom");
        assert!(!err.is_address_already_in_use());
    }

    #[test]
    fn test_address_in_use_helpers() {
        let err = GearError::AddressAlreadyInUse;
        assert!(err.is_address_already_in_use());
        assert!(!err.is_transport());
        assert_eq!(err.status(), None);
    }
}
