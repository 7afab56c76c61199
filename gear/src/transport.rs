//! The HTTP transport seam.
//!
//! The core never opens sockets. A [`Transport`] receives a fully signed
//! request and returns the raw status and body; connection pooling, TLS and
//! timeouts are its business. `mycelium-gear-http` provides the `reqwest`
//! implementation.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};

use crate::error::TransportError;

/// A signed request ready to be sent.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL: base URL, path and query exactly as signed.
    pub url: String,
    /// `X-Nonce` and `X-Signature` headers.
    pub headers: HeaderMap,
    /// Connect/read timeout for this call.
    pub timeout: Duration,
}

/// What the gateway answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response from a status and body.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request and returns the gateway's answer.
///
/// Implementations must not retry; a failure is reported once as a
/// [`TransportError`] and retry policy stays with the caller.
#[cfg_attr(target_family = "wasm", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_family = "wasm"), async_trait::async_trait)]
pub trait Transport: Send + Sync {
    /// Performs the request.
    async fn request(&self, request: TransportRequest)
    -> Result<TransportResponse, TransportError>;
}

#[cfg_attr(target_family = "wasm", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_family = "wasm"), async_trait::async_trait)]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn request(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        (**self).request(request).await
    }
}
