//! Gateway URLs, header names and well-known response texts.

use http::HeaderName;

/// Default REST base URL of the Mycelium Gear gateway.
pub const DEFAULT_API_URL: &str = "https://gateway.gear.mycelium.com";

/// Default base URL for order status websockets.
pub const DEFAULT_SOCKET_URL: &str = "wss://gateway.gear.mycelium.com";

/// Default base URL of the hosted payment page.
pub const DEFAULT_PAYMENT_URL: &str = "https://gateway.gear.mycelium.com";

/// Default connect/read timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// `X-Nonce`: request header carrying the integer nonce (client → gateway).
pub const NONCE_HEADER: HeaderName = HeaderName::from_static("x-nonce");

/// `X-Signature`: header carrying the base64 HMAC signature (both directions).
pub const SIGNATURE_HEADER: HeaderName = HeaderName::from_static("x-signature");

/// Body text the gateway answers with when the order address is still bound
/// to a pending order.
pub const ADDRESS_ALREADY_IN_USE: &str = "Invalid order: address already in use";
