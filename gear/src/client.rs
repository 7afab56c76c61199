//! The signed gateway client.
//!
//! [`GearClient`] turns a logical operation into a signed request, hands it
//! to the injected [`Transport`] and classifies the answer:
//!
//! | Outcome | Result |
//! |---|---|
//! | transport failure | [`GearError::Transport`] |
//! | `200` with a JSON object (or empty body) | `Ok(map)` |
//! | `200` with anything else | [`GearError::MalformedResponse`] |
//! | non-`200`, body `Invalid order: address already in use` | [`GearError::AddressAlreadyInUse`] |
//! | any other non-`200` | [`GearError::Gateway`] with the raw body |
//!
//! Nothing is retried. The client holds only immutable credentials and
//! configuration, so one instance can serve concurrent callers.

use std::fmt::Display;

use http::{HeaderMap, HeaderValue, Method, StatusCode};
use serde_json::{Map, Value};

use crate::config::GearConfig;
use crate::constants::{ADDRESS_ALREADY_IN_USE, NONCE_HEADER, SIGNATURE_HEADER};
use crate::credentials::GatewayCredentials;
use crate::endpoint::{LAST_KEYCHAIN_ID, ORDERS, QueryParams, build_path};
use crate::error::GearError;
use crate::nonce::Nonce;
use crate::order::{OrderRequest, OrderStatus};
use crate::signer::SignedRequest;
use crate::transport::{Transport, TransportRequest, TransportResponse};

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

/// Decoded body of a successful gateway response.
pub type GatewayResponse = Map<String, Value>;

/// Client for the Mycelium Gear gateway API.
///
/// # Example
///
/// ```no_run
/// # async fn run<T: mycelium_gear::transport::Transport>(transport: T) -> Result<(), mycelium_gear::error::GearError> {
/// use mycelium_gear::client::GearClient;
/// use mycelium_gear::credentials::GatewayCredentials;
/// use mycelium_gear::order::OrderRequest;
/// use rust_decimal::Decimal;
///
/// let client = GearClient::new(GatewayCredentials::new("gw1", "secret"), transport);
/// let order = client.create_order(&OrderRequest::new(Decimal::from(1000))).await?;
/// println!("{order:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GearClient<T> {
    credentials: GatewayCredentials,
    config: GearConfig,
    transport: T,
}

impl<T: Transport> GearClient<T> {
    /// Creates a client with the default [`GearConfig`].
    pub fn new(credentials: GatewayCredentials, transport: T) -> Self {
        Self::with_config(credentials, GearConfig::default(), transport)
    }

    /// Creates a client with a custom [`GearConfig`].
    pub const fn with_config(
        credentials: GatewayCredentials,
        config: GearConfig,
        transport: T,
    ) -> Self {
        Self {
            credentials,
            config,
            transport,
        }
    }

    /// Returns the gateway id.
    #[must_use]
    pub fn gateway_id(&self) -> &str {
        self.credentials.gateway_id()
    }

    /// Returns the credentials.
    #[must_use]
    pub const fn credentials(&self) -> &GatewayCredentials {
        &self.credentials
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &GearConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Creates an order.
    ///
    /// `POST /gateways/{gateway_id}/orders?amount=…[&keychain_id=…][&callback_data=…]`
    ///
    /// # Errors
    ///
    /// [`GearError::AddressAlreadyInUse`] if the derived address is bound to
    /// a pending order; see [`GearClient::send_signed`] for the rest.
    pub async fn create_order(&self, order: &OrderRequest) -> Result<GatewayResponse, GearError> {
        self.send_signed(Method::POST, ORDERS, &order.to_params()).await
    }

    /// Cancels an order.
    ///
    /// `POST /gateways/{gateway_id}/orders/{payment_id}/cancel`
    ///
    /// # Errors
    ///
    /// See [`GearClient::send_signed`].
    pub async fn cancel_order(
        &self,
        payment_id: impl Display + Send,
    ) -> Result<GatewayResponse, GearError> {
        let params = QueryParams::suffix(format!("{payment_id}/cancel"));
        self.send_signed(Method::POST, ORDERS, &params).await
    }

    /// Fetches the current order or payment data.
    ///
    /// `GET /gateways/{gateway_id}/orders/{payment_id}`
    ///
    /// # Errors
    ///
    /// See [`GearClient::send_signed`].
    pub async fn check_order(
        &self,
        payment_id: impl Display + Send,
    ) -> Result<GatewayResponse, GearError> {
        let params = QueryParams::suffix(payment_id.to_string());
        self.send_signed(Method::GET, ORDERS, &params).await
    }

    /// Fetches an order and decodes its `status` field.
    ///
    /// # Errors
    ///
    /// [`GearError::UnexpectedStatus`] if the field is missing or unknown;
    /// see [`GearClient::send_signed`] for the rest.
    pub async fn check_order_status(
        &self,
        payment_id: impl Display + Send,
    ) -> Result<OrderStatus, GearError> {
        let data = self.check_order(payment_id).await?;
        order_status(&data)
    }

    /// Fetches the last keychain id used by the gateway.
    ///
    /// `GET /gateways/{gateway_id}/last_keychain_id`
    ///
    /// # Errors
    ///
    /// See [`GearClient::send_signed`].
    pub async fn last_keychain_id(&self) -> Result<GatewayResponse, GearError> {
        self.send_signed(Method::GET, LAST_KEYCHAIN_ID, &QueryParams::None).await
    }

    /// Link to the hosted payment page of an order.
    #[must_use]
    pub fn order_payment_link(&self, payment_id: impl Display) -> String {
        format!("{}/pay/{payment_id}", self.config.payment_base_url())
    }

    /// Websocket link streaming status updates of an order.
    #[must_use]
    pub fn order_websocket_link(&self, payment_id: impl Display) -> String {
        format!(
            "{}{}/{payment_id}/websocket",
            self.config.socket_base_url(),
            build_path(self.gateway_id(), ORDERS)
        )
    }

    /// Checks the `X-Signature` of a callback received from the gateway.
    ///
    /// `path` is the request path including its query string. `signature`
    /// must be the base64 text as received.
    #[must_use]
    pub fn is_order_callback_valid(&self, method: &str, path: &str, signature: &str) -> bool {
        self.credentials
            .signer()
            .verify_callback(method, path, signature)
    }

    /// Builds the signed request for `resource` and `params` at `nonce`.
    #[must_use]
    pub fn signed_request(
        &self,
        method: Method,
        resource: &str,
        params: &QueryParams,
        nonce: Nonce,
    ) -> SignedRequest {
        SignedRequest {
            method,
            path: build_path(self.gateway_id(), resource),
            query: params.build_query(),
            nonce,
        }
    }

    /// Signs and sends a request to `/gateways/{gateway_id}/{resource}`,
    /// using the current second as nonce.
    ///
    /// # Errors
    ///
    /// - [`GearError::Transport`] if no response was received
    /// - [`GearError::AddressAlreadyInUse`] for the special-cased rejection
    /// - [`GearError::Gateway`] for any other non-200 response
    /// - [`GearError::MalformedResponse`] if a 200 body is not a JSON object
    pub async fn send_signed(
        &self,
        method: Method,
        resource: &str,
        params: &QueryParams,
    ) -> Result<GatewayResponse, GearError> {
        self.send_signed_with_nonce(method, resource, params, Nonce::now()).await
    }

    /// Same as [`GearClient::send_signed`] with an explicit nonce.
    ///
    /// # Errors
    ///
    /// See [`GearClient::send_signed`].
    pub async fn send_signed_with_nonce(
        &self,
        method: Method,
        resource: &str,
        params: &QueryParams,
        nonce: Nonce,
    ) -> Result<GatewayResponse, GearError> {
        let request = self.signed_request(method, resource, params, nonce);
        self.dispatch(&request).await
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gear.dispatch",
            skip_all,
            fields(
                method = %request.method,
                path = %request.path,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    async fn dispatch(&self, request: &SignedRequest) -> Result<GatewayResponse, GearError> {
        let signature = self.credentials.signer().sign(request);

        let mut headers = HeaderMap::new();
        headers.insert(NONCE_HEADER, HeaderValue::from(request.nonce.as_secs()));
        headers.insert(SIGNATURE_HEADER, signature_header(&signature)?);

        let transport_request = TransportRequest {
            method: request.method.clone(),
            url: format!("{}{}", self.config.base_url(), request.path_and_query()),
            headers,
            timeout: self.config.timeout(),
        };

        let result = match self.transport.request(transport_request).await {
            Ok(response) => classify(response),
            Err(e) => Err(GearError::Transport(e)),
        };

        record_result_on_span(&result);

        result
    }
}

/// Maps a gateway answer onto the success/error taxonomy.
fn classify(response: TransportResponse) -> Result<GatewayResponse, GearError> {
    let TransportResponse { status, body } = response;

    if status == StatusCode::OK {
        if body.trim().is_empty() {
            return Ok(GatewayResponse::new());
        }
        return serde_json::from_str::<GatewayResponse>(&body)
            .map_err(|source| GearError::MalformedResponse { source, body });
    }

    if body == ADDRESS_ALREADY_IN_USE {
        return Err(GearError::AddressAlreadyInUse);
    }

    Err(GearError::Gateway { status, body })
}

/// Encodes the base64 signature as an `X-Signature` value.
fn signature_header(signature: &str) -> Result<HeaderValue, GearError> {
    HeaderValue::from_str(signature).map_err(|source| GearError::InvalidHeader {
        name: SIGNATURE_HEADER,
        source,
    })
}

/// Decodes the `status` field of an order response.
///
/// # Errors
///
/// [`GearError::UnexpectedStatus`] if the field is missing or not a known status.
pub fn order_status(data: &GatewayResponse) -> Result<OrderStatus, GearError> {
    let value = data.get("status").cloned().unwrap_or(Value::Null);
    value
        .as_u64()
        .and_then(|raw| u8::try_from(raw).ok())
        .and_then(|raw| OrderStatus::try_from(raw).ok())
        .ok_or(GearError::UnexpectedStatus { value })
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R>(result: &Result<R, GearError>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
            tracing::debug!("gateway request succeeded");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to gateway failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R>(_result: &Result<R, GearError>) {}
