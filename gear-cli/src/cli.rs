//! Command-line arguments.
//!
//! Every global option falls back to an environment variable, and `main`
//! loads a `.env` file first, so credentials never have to appear on the
//! command line.

use std::fmt;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mycelium_gear::constants::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use mycelium_gear::{GatewayCredentials, GearConfig, GearError, OrderRequest};
use rust_decimal::Decimal;

/// Mycelium Gear gateway client.
#[derive(Parser)]
#[command(name = "gear", version, about)]
pub struct Cli {
    /// Gateway id.
    #[arg(long, env = "GEAR_GATEWAY_ID")]
    pub gateway_id: String,

    /// Gateway secret.
    #[arg(long, env = "GEAR_GATEWAY_SECRET", hide_env_values = true)]
    pub gateway_secret: String,

    /// REST base URL of the gateway.
    #[arg(long, env = "GEAR_BASE_URL", default_value = DEFAULT_API_URL)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "GEAR_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Command,
}

/// Gateway operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an order.
    CreateOrder {
        /// Amount in the gateway currency (satoshis for BTC gateways).
        #[arg(long)]
        amount: Decimal,
        /// Keychain id used to derive the deposit address.
        #[arg(long)]
        keychain_id: Option<u64>,
        /// Data echoed back in callbacks.
        #[arg(long)]
        callback_data: Option<String>,
    },
    /// Cancel an order.
    CancelOrder {
        /// Order or payment id.
        payment_id: String,
    },
    /// Show an order.
    CheckOrder {
        /// Order or payment id.
        payment_id: String,
    },
    /// Show the last keychain id used by the gateway.
    LastKeychainId,
    /// Print the payment page link of an order.
    PaymentLink {
        /// Order or payment id.
        payment_id: String,
    },
    /// Print the status websocket link of an order.
    WebsocketLink {
        /// Order or payment id.
        payment_id: String,
    },
    /// Check the signature of a gateway callback. Exits with 2 if invalid.
    VerifyCallback {
        /// HTTP method of the callback.
        #[arg(long)]
        method: String,
        /// Request path including the query string.
        #[arg(long)]
        path: String,
        /// Value of the `X-Signature` header.
        #[arg(long)]
        signature: String,
    },
}

impl Cli {
    /// Credentials from `--gateway-id` / `--gateway-secret`.
    #[must_use]
    pub fn credentials(&self) -> GatewayCredentials {
        GatewayCredentials::new(&self.gateway_id, &self.gateway_secret)
    }

    /// Client configuration from `--base-url` / `--timeout-secs`.
    ///
    /// # Errors
    ///
    /// Returns [`GearError::InvalidBaseUrl`] if the base URL is rejected.
    pub fn config(&self) -> Result<GearConfig, GearError> {
        Ok(GearConfig::new(&self.base_url)?.with_timeout(Duration::from_secs(self.timeout_secs)))
    }
}

impl Command {
    /// Order parameters of a `create-order` invocation.
    #[must_use]
    pub fn order_request(&self) -> Option<OrderRequest> {
        let Self::CreateOrder {
            amount,
            keychain_id,
            callback_data,
        } = self
        else {
            return None;
        };
        let mut request = OrderRequest::new(*amount);
        if let Some(keychain_id) = keychain_id {
            request = request.with_keychain_id(*keychain_id);
        }
        if let Some(callback_data) = callback_data {
            request = request.with_callback_data(callback_data);
        }
        Some(request)
    }
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("gateway_id", &self.gateway_id)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}
