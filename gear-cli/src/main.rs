//! `gear`: command-line client for the Mycelium Gear gateway.
//!
//! # Usage
//!
//! ```bash
//! export GEAR_GATEWAY_ID=... GEAR_GATEWAY_SECRET=...
//! gear create-order --amount 1000
//! gear check-order 42
//! gear verify-callback --method GET --path '/callback?status=2' --signature '...'
//!
//! # Configure logging level
//! RUST_LOG=debug gear last-keychain-id
//! ```
//!
//! # Environment Variables
//!
//! - `GEAR_GATEWAY_ID` / `GEAR_GATEWAY_SECRET` - Gateway credentials
//! - `GEAR_BASE_URL` - Override the REST base URL
//! - `GEAR_TIMEOUT_SECS` - Request timeout (default: `60`)
//! - `RUST_LOG` - Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

mod cli;

use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use mycelium_gear::GatewayResponse;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

/// Exit status of `verify-callback` for an invalid signature.
const INVALID_SIGNATURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("gear failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = cli.config()?;
    tracing::debug!(
        gateway_id = %cli.gateway_id,
        base_url = config.base_url(),
        timeout = ?config.timeout(),
        "Loaded configuration"
    );
    let client = mycelium_gear_http::client_with_config(cli.credentials(), config);

    match &cli.command {
        Command::CreateOrder { .. } => {
            let request = cli
                .command
                .order_request()
                .ok_or("create-order without order parameters")?;
            emit_json(&client.create_order(&request).await?)?;
        }
        Command::CancelOrder { payment_id } => {
            emit_json(&client.cancel_order(payment_id).await?)?;
        }
        Command::CheckOrder { payment_id } => {
            let data = client.check_order(payment_id).await?;
            if let Ok(status) = mycelium_gear::client::order_status(&data) {
                tracing::info!(%payment_id, %status, "Order status");
            }
            emit_json(&data)?;
        }
        Command::LastKeychainId => {
            emit_json(&client.last_keychain_id().await?)?;
        }
        Command::PaymentLink { payment_id } => {
            emit_line(&client.order_payment_link(payment_id))?;
        }
        Command::WebsocketLink { payment_id } => {
            emit_line(&client.order_websocket_link(payment_id))?;
        }
        Command::VerifyCallback {
            method,
            path,
            signature,
        } => {
            let valid = client.is_order_callback_valid(method, path, signature);
            emit_line(if valid { "valid" } else { "invalid" })?;
            if !valid {
                tracing::warn!(%method, %path, "Callback signature mismatch");
                return Ok(ExitCode::from(INVALID_SIGNATURE));
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn emit_json(data: &GatewayResponse) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, data)?;
    writeln!(stdout)
}

fn emit_line(line: &str) -> std::io::Result<()> {
    writeln!(std::io::stdout().lock(), "{line}")
}
