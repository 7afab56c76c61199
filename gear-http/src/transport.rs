//! [`Transport`] on top of a shared `reqwest` client.

use mycelium_gear::error::TransportError;
use mycelium_gear::transport::{Transport, TransportRequest, TransportResponse};
use reqwest::Client;

#[cfg(feature = "telemetry")]
use tracing::instrument;

/// Sends signed gateway requests with `reqwest`.
///
/// The per-request timeout comes from the
/// [`GearConfig`](mycelium_gear::GearConfig) of the client; no retries are
/// performed. Cloning is cheap and shares the connection pool.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh `reqwest` client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport reusing a pre-configured `reqwest` client
    /// (proxies, custom TLS roots, user agent).
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Returns the underlying `reqwest` client.
    #[must_use]
    pub const fn inner(&self) -> &Client {
        &self.client
    }
}

#[cfg_attr(target_family = "wasm", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_family = "wasm"), async_trait::async_trait)]
impl Transport for ReqwestTransport {
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gear.http.request",
            skip_all,
            fields(method = %request.method, timeout = ?request.timeout)
        )
    )]
    async fn request(
        &self,
        request: TransportRequest,
    ) -> Result<TransportResponse, TransportError> {
        let context = format!("{} {}", request.method, request.url);

        let response = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                let timeout = e.is_timeout();
                TransportError::new(context.clone(), e).with_timeout(timeout)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            let timeout = e.is_timeout();
            TransportError::new(context, e).with_timeout(timeout)
        })?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(%status, bytes = body.len(), "gateway responded");

        Ok(TransportResponse { status, body })
    }
}
