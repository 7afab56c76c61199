#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Client core for the Mycelium Gear payment gateway.
//!
//! Every outbound call to the gateway carries an `X-Nonce` (the current Unix
//! second) and an `X-Signature` (base64 HMAC-SHA512 over the method, path,
//! query and a hash of the nonce). Callbacks from the gateway are signed with
//! the same key but a fixed nonce. This crate builds the canonical request
//! strings, computes and verifies those signatures, and classifies gateway
//! answers into typed results. The network call itself goes through the
//! [`transport::Transport`] trait; `mycelium-gear-http` implements it with
//! `reqwest`.
//!
//! # Modules
//!
//! - [`client`] - [`client::GearClient`] and the order operations
//! - [`config`] - Base URLs and timeout
//! - [`constants`] - Default URLs, header names, special response texts
//! - [`credentials`] - Gateway id and secret
//! - [`endpoint`] - Canonical paths and query strings
//! - [`error`] - Error taxonomy
//! - [`nonce`] - Timestamp nonces
//! - [`order`] - Order parameters and statuses
//! - [`signer`] - HMAC signing and callback verification
//! - [`transport`] - The HTTP transport seam
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of dispatched requests

pub mod client;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod endpoint;
pub mod error;
pub mod nonce;
pub mod order;
pub mod signer;
pub mod transport;

pub use client::{GatewayResponse, GearClient};
pub use config::GearConfig;
pub use credentials::GatewayCredentials;
pub use error::{GearError, TransportError};
pub use order::{OrderRequest, OrderStatus};
