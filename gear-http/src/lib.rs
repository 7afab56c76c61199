//! `reqwest` transport for the Mycelium Gear gateway client.
//!
//! Provides [`ReqwestTransport`], the production implementation of
//! [`mycelium_gear::transport::Transport`], and shortcuts that wire it into a
//! [`GearClient`].
//!
//! ```no_run
//! # async fn run() -> Result<(), mycelium_gear::GearError> {
//! use mycelium_gear::GatewayCredentials;
//!
//! let client = mycelium_gear_http::client(GatewayCredentials::new("gw1", "secret"));
//! let last = client.last_keychain_id().await?;
//! assert!(last.contains_key("last_keychain_id"));
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `telemetry` - Tracing spans around each HTTP call (also enables
//!   `mycelium-gear/telemetry`)

mod transport;

pub use transport::ReqwestTransport;

use mycelium_gear::{GatewayCredentials, GearClient, GearConfig};

/// A [`GearClient`] sending requests with `reqwest`.
pub type HttpGearClient = GearClient<ReqwestTransport>;

/// Creates a client for the public gateway with the default configuration.
#[must_use]
pub fn client(credentials: GatewayCredentials) -> HttpGearClient {
    GearClient::new(credentials, ReqwestTransport::new())
}

/// Creates a client with a custom configuration.
#[must_use]
pub fn client_with_config(credentials: GatewayCredentials, config: GearConfig) -> HttpGearClient {
    GearClient::with_config(credentials, config, ReqwestTransport::new())
}
